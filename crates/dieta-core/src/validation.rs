//! # Validation Module
//!
//! Business-rule validation for Dieta payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Payload parsing (input.rs)                                   │
//! │  ├── JSON object? correct JSON types?                                  │
//! │  └── Unknown keys dropped                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure, no I/O)                                   │
//! │  ├── Required fields, non-blank text                                   │
//! │  ├── Non-negative counts, non-empty foods                              │
//! │  └── Meal type in the enumeration                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Existence lookups (dieta-service)                            │
//! │  └── Does the referenced diet/meal/exercise exist right now?           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checks run in field order and stop at the first failure, so the client
//! always gets exactly one `(message, field)` pair back.
//!
//! ## Create vs. Update
//! - `validate_new_*` requires every required field and yields a `New*`.
//! - `validate_*_changes` only looks at fields present in the payload and
//!   yields a `*Changes`. An explicit `null` on a required field is rejected
//!   as "required"; on `description` it clears, on `diet_id` it detaches.
//!
//! ## Usage
//! ```rust
//! use dieta_core::input::{MealInput, Payload};
//! use dieta_core::validation::validate_new_meal;
//!
//! let input = MealInput::from_json(
//!     r#"{"meal_type": "Almoço", "quantity": 300, "foods": ["arroz"]}"#,
//! ).unwrap();
//! let meal = validate_new_meal(input).unwrap();
//! assert_eq!(meal.meal_type, "Almoço");
//! ```

use crate::error::ValidationError;
use crate::input::{DietInput, ExerciseInput, Field, Foods, MealInput};
use crate::types::{
    DietChanges, ExerciseChanges, MealChanges, MealType, NewDiet, NewExercise, NewMeal,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Primitive Checks
// =============================================================================

/// Fails if the value is missing or blank.
///
/// ## Example
/// ```rust
/// use dieta_core::validation::not_empty;
///
/// assert!(not_empty(Some("perder peso"), "goal").is_ok());
/// assert!(not_empty(Some("   "), "goal").is_err());
/// assert!(not_empty(None, "goal").is_err());
/// ```
pub fn not_empty(value: Option<&str>, field: &str) -> ValidationResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::required(field)),
    }
}

/// Fails if the value is below zero. Zero is allowed.
pub fn not_negative(value: i64, field: &str) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::negative(field));
    }
    Ok(())
}

/// Fails if the list has no elements.
pub fn list_not_empty(value: &[String], field: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::empty_list(field));
    }
    Ok(())
}

/// Fails unless the value, lowercased, is one of the meal types.
///
/// ## Example
/// ```rust
/// use dieta_core::validation::meal_type_valid;
/// use dieta_core::MealType;
///
/// assert_eq!(meal_type_valid("Almoço").unwrap(), MealType::Lunch);
/// assert!(meal_type_valid("brunch").is_err());
/// ```
pub fn meal_type_valid(value: &str) -> ValidationResult<MealType> {
    value.parse()
}

// =============================================================================
// Field Helpers
// =============================================================================

fn required_text(value: &Field<String>, field: &str) -> ValidationResult<String> {
    let text = value.as_option().map(String::as_str);
    not_empty(text, field)?;
    Ok(text.unwrap_or_default().to_string())
}

fn required_count(value: &Field<i64>, field: &str) -> ValidationResult<i64> {
    match value {
        Field::Value(n) => {
            not_negative(*n, field)?;
            Ok(*n)
        }
        Field::Absent | Field::Null => Err(ValidationError::required(field)),
    }
}

fn required_meal_type(value: &Field<String>) -> ValidationResult<String> {
    let meal_type = required_text(value, "meal_type")?;
    meal_type_valid(&meal_type)?;
    Ok(meal_type)
}

fn required_foods(value: Field<Foods>) -> ValidationResult<Vec<String>> {
    let foods = match value {
        Field::Value(foods) => foods.into_vec(),
        Field::Absent | Field::Null => Vec::new(),
    };
    list_not_empty(&foods, "foods")?;
    Ok(foods)
}

/// Present-only variant of `required_text`.
fn changed_text(value: &Field<String>, field: &str) -> ValidationResult<Option<String>> {
    if value.is_absent() {
        return Ok(None);
    }
    required_text(value, field).map(Some)
}

fn changed_count(value: &Field<i64>, field: &str) -> ValidationResult<Option<i64>> {
    if value.is_absent() {
        return Ok(None);
    }
    required_count(value, field).map(Some)
}

/// Absent leaves the value alone, null clears it.
fn clearable<T: Clone>(value: &Field<T>) -> Option<Option<T>> {
    match value {
        Field::Absent => None,
        Field::Null => Some(None),
        Field::Value(v) => Some(Some(v.clone())),
    }
}

// =============================================================================
// Diet
// =============================================================================

/// Validates a Diet create payload.
///
/// ## Rules
/// - `goal` is required and not blank
/// - `description` is optional
pub fn validate_new_diet(input: DietInput) -> ValidationResult<NewDiet> {
    Ok(NewDiet {
        goal: required_text(&input.goal, "goal")?,
        description: input.description.as_option().cloned(),
    })
}

/// Validates a Diet partial update.
pub fn validate_diet_changes(input: DietInput) -> ValidationResult<DietChanges> {
    Ok(DietChanges {
        goal: changed_text(&input.goal, "goal")?,
        description: clearable(&input.description),
    })
}

// =============================================================================
// Meal
// =============================================================================

/// Validates a Meal create payload.
///
/// ## Rules (in order)
/// ```text
/// meal_type  required, one of the meal types (any casing)
/// quantity   required, >= 0
/// foods      required, at least one food (a single string is accepted)
/// diet_id    optional; existence is checked by the caller
/// ```
pub fn validate_new_meal(input: MealInput) -> ValidationResult<NewMeal> {
    let meal_type = required_meal_type(&input.meal_type)?;
    let quantity = required_count(&input.quantity, "quantity")?;
    let diet_id = input.diet_id.as_option().copied();
    let foods = required_foods(input.foods)?;

    Ok(NewMeal {
        meal_type,
        quantity,
        foods,
        diet_id,
    })
}

/// Validates a Meal partial update.
pub fn validate_meal_changes(input: MealInput) -> ValidationResult<MealChanges> {
    let meal_type = if input.meal_type.is_absent() {
        None
    } else {
        Some(required_meal_type(&input.meal_type)?)
    };
    let quantity = changed_count(&input.quantity, "quantity")?;
    let diet_id = clearable(&input.diet_id);
    let foods = if input.foods.is_absent() {
        None
    } else {
        Some(required_foods(input.foods)?)
    };

    Ok(MealChanges {
        meal_type,
        quantity,
        foods,
        diet_id,
    })
}

// =============================================================================
// Exercise
// =============================================================================

/// Validates an Exercise create payload.
///
/// ## Rules (in order)
/// - `exercise_type` required, not blank
/// - `repetition_count`, `cycle_count`, `rest_between_cycles` required, >= 0
/// - `diet_id` optional
pub fn validate_new_exercise(input: ExerciseInput) -> ValidationResult<NewExercise> {
    Ok(NewExercise {
        exercise_type: required_text(&input.exercise_type, "exercise_type")?,
        repetition_count: required_count(&input.repetition_count, "repetition_count")?,
        cycle_count: required_count(&input.cycle_count, "cycle_count")?,
        rest_between_cycles: required_count(&input.rest_between_cycles, "rest_between_cycles")?,
        diet_id: input.diet_id.as_option().copied(),
    })
}

/// Validates an Exercise partial update.
pub fn validate_exercise_changes(input: ExerciseInput) -> ValidationResult<ExerciseChanges> {
    Ok(ExerciseChanges {
        exercise_type: changed_text(&input.exercise_type, "exercise_type")?,
        repetition_count: changed_count(&input.repetition_count, "repetition_count")?,
        cycle_count: changed_count(&input.cycle_count, "cycle_count")?,
        rest_between_cycles: changed_count(&input.rest_between_cycles, "rest_between_cycles")?,
        diet_id: clearable(&input.diet_id),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Payload;
    use serde_json::{json, Value};

    fn diet(v: Value) -> DietInput {
        DietInput::from_value(v).unwrap()
    }

    fn meal(v: Value) -> MealInput {
        MealInput::from_value(v).unwrap()
    }

    fn exercise(v: Value) -> ExerciseInput {
        ExerciseInput::from_value(v).unwrap()
    }

    #[test]
    fn test_primitive_checks() {
        assert!(not_empty(Some("x"), "goal").is_ok());
        assert!(not_empty(Some(""), "goal").is_err());
        assert!(not_empty(None, "goal").is_err());

        assert!(not_negative(0, "quantity").is_ok());
        assert!(not_negative(-1, "quantity").is_err());

        assert!(list_not_empty(&["arroz".to_string()], "foods").is_ok());
        assert!(list_not_empty(&[], "foods").is_err());
    }

    #[test]
    fn test_new_diet() {
        let new = validate_new_diet(diet(json!({ "goal": "perder peso" }))).unwrap();
        assert_eq!(new.goal, "perder peso");
        assert_eq!(new.description, None);

        let err = validate_new_diet(diet(json!({ "goal": "  ", "description": "x" }))).unwrap_err();
        assert_eq!(err, ValidationError::required("goal"));

        // Only unknown keys: falls through to the first required field
        let err = validate_new_diet(diet(json!({ "id": 5 }))).unwrap_err();
        assert_eq!(err, ValidationError::required("goal"));
    }

    #[test]
    fn test_diet_changes_null_description_clears() {
        let changes = validate_diet_changes(diet(json!({ "description": null }))).unwrap();
        assert_eq!(changes.goal, None);
        assert_eq!(changes.description, Some(None));

        let err = validate_diet_changes(diet(json!({ "goal": null }))).unwrap_err();
        assert_eq!(err.field(), "goal");
    }

    #[test]
    fn test_new_meal_accepts_any_casing() {
        for meal_type in ["almoço", "Almoço", "ALMOÇO"] {
            let new = validate_new_meal(meal(json!({
                "meal_type": meal_type,
                "quantity": 300,
                "foods": ["arroz"]
            })))
            .unwrap();
            assert_eq!(new.meal_type, meal_type);
        }
    }

    #[test]
    fn test_new_meal_field_order() {
        // meal_type is checked before quantity
        let err = validate_new_meal(meal(json!({ "meal_type": "brunch", "quantity": -1 })))
            .unwrap_err();
        assert_eq!(err.field(), "meal_type");

        let err = validate_new_meal(meal(json!({ "meal_type": "jantar", "foods": ["sopa"] })))
            .unwrap_err();
        assert_eq!(err, ValidationError::required("quantity"));

        let err = validate_new_meal(meal(json!({ "meal_type": "jantar", "quantity": 0, "foods": [] })))
            .unwrap_err();
        assert_eq!(err, ValidationError::empty_list("foods"));
    }

    #[test]
    fn test_new_meal_wraps_single_food() {
        let new = validate_new_meal(meal(json!({
            "meal_type": "lanche",
            "quantity": 1,
            "foods": "banana",
            "diet_id": 4
        })))
        .unwrap();
        assert_eq!(new.foods, vec!["banana"]);
        assert_eq!(new.diet_id, Some(4));
    }

    #[test]
    fn test_meal_changes_only_present_fields() {
        let changes = validate_meal_changes(meal(json!({ "quantity": 150 }))).unwrap();
        assert_eq!(
            changes,
            MealChanges {
                quantity: Some(150),
                ..Default::default()
            }
        );

        let changes = validate_meal_changes(meal(json!({ "diet_id": null }))).unwrap();
        assert_eq!(changes.diet_id, Some(None));

        let err = validate_meal_changes(meal(json!({ "foods": [] }))).unwrap_err();
        assert_eq!(err.field(), "foods");

        let err = validate_meal_changes(meal(json!({ "meal_type": "Brunch" }))).unwrap_err();
        assert_eq!(err.field(), "meal_type");
    }

    #[test]
    fn test_new_exercise_negative_cycle_count() {
        let err = validate_new_exercise(exercise(json!({
            "exercise_type": "flexão",
            "repetition_count": 10,
            "cycle_count": -1,
            "rest_between_cycles": 30
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::negative("cycle_count"));
    }

    #[test]
    fn test_new_exercise_zero_is_allowed() {
        let new = validate_new_exercise(exercise(json!({
            "exercise_type": "prancha",
            "repetition_count": 0,
            "cycle_count": 0,
            "rest_between_cycles": 0
        })))
        .unwrap();
        assert_eq!(new.cycle_count, 0);
        assert_eq!(new.diet_id, None);
    }

    #[test]
    fn test_exercise_changes() {
        let changes =
            validate_exercise_changes(exercise(json!({ "rest_between_cycles": 45, "diet_id": 2 })))
                .unwrap();
        assert_eq!(changes.rest_between_cycles, Some(45));
        assert_eq!(changes.diet_id, Some(Some(2)));
        assert_eq!(changes.exercise_type, None);

        let err = validate_exercise_changes(exercise(json!({ "repetition_count": null })))
            .unwrap_err();
        assert_eq!(err, ValidationError::required("repetition_count"));

        let changes = validate_exercise_changes(exercise(json!({ "unknown": 1 }))).unwrap();
        assert!(changes.is_empty());
    }
}
