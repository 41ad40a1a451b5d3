//! # Untrusted Payloads
//!
//! Parsing of client payloads into typed, not-yet-validated inputs.
//!
//! ## Three States per Field
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON payload                       Field<T>                            │
//! │  ───────────────────────────────    ───────────────────────────────     │
//! │  { }                                Absent    → "leave it alone"        │
//! │  { "description": null }            Null      → "clear it"             │
//! │  { "description": "low carb" }      Value(..) → "set it"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A plain `Option<T>` cannot tell the first two apart, and partial update
//! needs both: a missing key keeps the stored value while an explicit `null`
//! on `diet_id` detaches a meal.
//!
//! ## Allowed Fields
//! Each input struct lists exactly the writable fields of its entity. Keys
//! that are not listed (`id`, `created_at`, typos) are dropped during
//! deserialization, so they can never reach the store.
//!
//! Only an object with no keys at all is rejected as empty. An object whose
//! keys were all dropped parses to an input with every field `Absent`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ValidationError;

// =============================================================================
// Field
// =============================================================================

/// A payload field that may be absent, explicitly null, or set.
///
/// Use with `#[serde(default)]` so that missing keys become `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Collapses `Absent` and `Null` into `None`.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Absent | Field::Null => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

// =============================================================================
// Foods
// =============================================================================

/// The `foods` field accepts one food or a list of foods.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Foods {
    One(String),
    Many(Vec<String>),
}

impl Foods {
    /// Normalizes to a list. A single food becomes a one-element list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Foods::One(food) => vec![food],
            Foods::Many(foods) => foods,
        }
    }
}

// =============================================================================
// Payload Trait
// =============================================================================

/// Shared parsing for the entity input types.
///
/// ## Example
/// ```rust
/// use dieta_core::input::{MealInput, Payload};
///
/// let input = MealInput::from_json(r#"{"meal_type": "almoço", "foods": "arroz"}"#).unwrap();
/// assert!(input.quantity.is_absent());
///
/// assert!(MealInput::from_json("[1, 2]").is_err());
/// ```
pub trait Payload: DeserializeOwned {
    /// Parses a raw JSON document.
    fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ValidationError::malformed(e.to_string()))?;
        Self::from_value(value)
    }

    /// Converts an already-parsed JSON value.
    ///
    /// Only non-empty objects are accepted; a field with the wrong JSON type
    /// fails the whole payload.
    fn from_value(value: Value) -> Result<Self, ValidationError> {
        match value.as_object() {
            None => return Err(ValidationError::malformed("expected a JSON object")),
            Some(map) if map.is_empty() => return Err(ValidationError::EmptyPayload),
            Some(_) => {}
        }
        serde_json::from_value(value).map_err(|e| ValidationError::malformed(e.to_string()))
    }
}

// =============================================================================
// Entity Inputs
// =============================================================================

/// Writable fields of a Diet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DietInput {
    pub goal: Field<String>,
    pub description: Field<String>,
}

impl Payload for DietInput {}

/// Writable fields of a Meal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MealInput {
    pub meal_type: Field<String>,
    pub quantity: Field<i64>,
    pub foods: Field<Foods>,
    pub diet_id: Field<i64>,
}

impl Payload for MealInput {}

/// Writable fields of an Exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExerciseInput {
    pub exercise_type: Field<String>,
    pub repetition_count: Field<i64>,
    pub cycle_count: Field<i64>,
    pub rest_between_cycles: Field<i64>,
    pub diet_id: Field<i64>,
}

impl Payload for ExerciseInput {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_three_states() {
        let input = DietInput::from_value(json!({ "description": null })).unwrap();
        assert_eq!(input.goal, Field::Absent);
        assert_eq!(input.description, Field::Null);

        let input = DietInput::from_value(json!({ "goal": "ganhar massa" })).unwrap();
        assert_eq!(input.goal, Field::Value("ganhar massa".to_string()));
        assert_eq!(input.goal.as_option().map(String::as_str), Some("ganhar massa"));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let input = DietInput::from_value(json!({
            "id": 99,
            "created_at": "2020-01-01T00:00:00Z",
            "goal": "perder peso"
        }))
        .unwrap();
        assert_eq!(input.goal, Field::Value("perder peso".to_string()));

        let input = DietInput::from_value(json!({ "id": 99 })).unwrap();
        assert_eq!(input, DietInput::default());
    }

    #[test]
    fn test_foods_accepts_string_or_list() {
        let input = MealInput::from_value(json!({ "foods": "arroz" })).unwrap();
        let foods = match input.foods {
            Field::Value(f) => f.into_vec(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(foods, vec!["arroz"]);

        let input = MealInput::from_value(json!({ "foods": ["arroz", "arroz"] })).unwrap();
        let foods = match input.foods {
            Field::Value(f) => f.into_vec(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(foods, vec!["arroz", "arroz"]);
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        let err = ExerciseInput::from_json("[]").unwrap_err();
        assert_eq!(err.field(), "payload");

        let err = ExerciseInput::from_json("not json").unwrap_err();
        assert_eq!(err.field(), "payload");
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let err = ExerciseInput::from_value(json!({ "cycle_count": "three" })).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_object_without_keys_is_empty() {
        let err = MealInput::from_json("{}").unwrap_err();
        assert_eq!(err, ValidationError::EmptyPayload);

        let input = MealInput::from_value(json!({ "diet_id": null })).unwrap();
        assert_eq!(input.diet_id, Field::Null);

        let input = ExerciseInput::from_value(json!({ "unknown": 1 })).unwrap();
        assert_eq!(input, ExerciseInput::default());
    }
}
