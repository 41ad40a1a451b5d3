//! # Domain Types
//!
//! Core domain types used throughout Dieta.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │                      ┌─────────────────┐                                │
//! │                      │      Diet       │                                │
//! │                      │  ─────────────  │                                │
//! │                      │  id (i64)       │                                │
//! │                      │  goal           │                                │
//! │                      │  description?   │                                │
//! │                      └───┬─────────┬───┘                                │
//! │              diet_id (FK)│         │diet_id (FK)                        │
//! │                          ▼         ▼                                    │
//! │   ┌─────────────────────────┐   ┌─────────────────────────┐             │
//! │   │          Meal           │   │        Exercise         │             │
//! │   │  ─────────────────────  │   │  ─────────────────────  │             │
//! │   │  meal_type (MealType)   │   │  exercise_type          │             │
//! │   │  quantity  (>= 0)       │   │  repetition_count (>=0) │             │
//! │   │  foods     (non-empty)  │   │  cycle_count      (>=0) │             │
//! │   │  diet_id?               │   │  rest_between_cycles    │             │
//! │   └─────────────────────────┘   │  diet_id?               │             │
//! │                                 └─────────────────────────┘             │
//! │                                                                         │
//! │  Deleting a Diet deletes every Meal and Exercise pointing at it.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Models
//! Entities are never built by hand outside the store. Writes go through:
//! - `NewDiet` / `NewMeal` / `NewExercise` - a fully validated create payload
//! - `DietChanges` / `MealChanges` / `ExerciseChanges` - a validated partial
//!   update where `None` means "leave the stored value alone"

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Entity Kind
// =============================================================================

/// The three persisted entity types.
///
/// Used in `NotFound` errors and log fields so callers can tell which table
/// a missing id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EntityKind {
    Diet,
    Meal,
    Exercise,
}

impl EntityKind {
    /// Human-readable name ("Diet", "Meal", "Exercise").
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Diet => "Diet",
            EntityKind::Meal => "Meal",
            EntityKind::Exercise => "Exercise",
        }
    }

    /// Payload field that references an entity of this kind.
    ///
    /// ## Example
    /// ```rust
    /// use dieta_core::EntityKind;
    ///
    /// assert_eq!(EntityKind::Diet.id_field(), "diet_id");
    /// assert_eq!(EntityKind::Meal.id_field(), "meal_id");
    /// ```
    pub const fn id_field(&self) -> &'static str {
        match self {
            EntityKind::Diet => "diet_id",
            EntityKind::Meal => "meal_id",
            EntityKind::Exercise => "exercise_id",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Meal Type
// =============================================================================

/// The closed set of meal types.
///
/// ## Matching Rules
/// ```text
/// "Almoço"  ──► to_lowercase ──► "almoço"  ──► MealType::Lunch   ✓
/// "ALMOÇO"  ──► to_lowercase ──► "almoço"  ──► MealType::Lunch   ✓
/// "brunch"  ──► to_lowercase ──► "brunch"  ──► no match          ✗
/// ```
/// The comparison is case-insensitive but the stored value keeps the casing
/// the client sent, so `Meal::meal_type` stays a `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// "café da manhã"
    Breakfast,
    /// "almoço"
    Lunch,
    /// "jantar"
    Dinner,
    /// "lanche"
    Snack,
    /// "ceia"
    EveningSnack,
    /// "pré-treino"
    PreWorkout,
    /// "pós-treino"
    PostWorkout,
}

impl MealType {
    /// Every meal type, in display order.
    pub const ALL: [MealType; 7] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
        MealType::EveningSnack,
        MealType::PreWorkout,
        MealType::PostWorkout,
    ];

    /// Canonical (lowercase) label.
    pub const fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "café da manhã",
            MealType::Lunch => "almoço",
            MealType::Dinner => "jantar",
            MealType::Snack => "lanche",
            MealType::EveningSnack => "ceia",
            MealType::PreWorkout => "pré-treino",
            MealType::PostWorkout => "pós-treino",
        }
    }

    /// Looks up a meal type ignoring case.
    ///
    /// ## Example
    /// ```rust
    /// use dieta_core::MealType;
    ///
    /// assert_eq!(MealType::parse("Almoço"), Some(MealType::Lunch));
    /// assert_eq!(MealType::parse("PRÉ-TREINO"), Some(MealType::PreWorkout));
    /// assert_eq!(MealType::parse("brunch"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.to_lowercase();
        MealType::ALL.into_iter().find(|t| t.label() == lowered)
    }

    /// All labels, for error messages.
    pub fn labels() -> Vec<String> {
        MealType::ALL.iter().map(|t| t.label().to_string()).collect()
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::parse(s).ok_or_else(|| ValidationError::NotAllowed {
            field: "meal_type".to_string(),
            allowed: MealType::labels(),
        })
    }
}

// =============================================================================
// Diet
// =============================================================================

/// A dietary plan. Root of the ownership tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Diet {
    /// Autoincrement identifier assigned on create.
    pub id: i64,

    /// What the plan is for ("lose weight", "bulk", ...). Never blank.
    pub goal: String,

    /// Free-form notes.
    pub description: Option<String>,

    /// When the diet was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A Diet with the number of children attached.
///
/// Returned by list, create and update so a client can render a diet row
/// without fetching its meals and exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct DietSummary {
    pub id: i64,
    pub goal: String,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub meal_count: i64,
    pub exercise_count: i64,
}

impl DietSummary {
    pub fn new(diet: Diet, meal_count: i64, exercise_count: i64) -> Self {
        DietSummary {
            id: diet.id,
            goal: diet.goal,
            description: diet.description,
            created_at: diet.created_at,
            meal_count,
            exercise_count,
        }
    }
}

/// A Diet with its meals and exercises inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DietDetail {
    pub id: i64,
    pub goal: String,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
}

impl DietDetail {
    pub fn new(diet: Diet, meals: Vec<Meal>, exercises: Vec<Exercise>) -> Self {
        DietDetail {
            id: diet.id,
            goal: diet.goal,
            description: diet.description,
            created_at: diet.created_at,
            meals,
            exercises,
        }
    }
}

// =============================================================================
// Meal
// =============================================================================

/// A food entry, optionally attached to a Diet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Meal {
    pub id: i64,

    /// One of the meal types, stored with the casing the client sent.
    pub meal_type: String,

    /// Portion size. Never negative.
    pub quantity: i64,

    /// Foods in this meal. Never empty; duplicates are allowed.
    /// Stored as a JSON array column.
    #[cfg_attr(feature = "sqlx", sqlx(json))]
    pub foods: Vec<String>,

    /// Owning diet, if any.
    pub diet_id: Option<i64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Meal {
    /// Food list with `food` appended, unless it is already present.
    pub fn foods_with(&self, food: &str) -> Vec<String> {
        let mut foods = self.foods.clone();
        if !foods.iter().any(|f| f == food) {
            foods.push(food.to_string());
        }
        foods
    }

    /// Food list with every occurrence of `food` removed.
    pub fn foods_without(&self, food: &str) -> Vec<String> {
        self.foods.iter().filter(|f| *f != food).cloned().collect()
    }
}

// =============================================================================
// Exercise
// =============================================================================

/// A workout entry, optionally attached to a Diet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Exercise {
    pub id: i64,

    pub exercise_type: String,

    /// Repetitions per cycle.
    pub repetition_count: i64,

    /// Number of cycles (sets).
    pub cycle_count: i64,

    /// Rest between cycles, in seconds.
    pub rest_between_cycles: i64,

    pub diet_id: Option<i64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Total resting time across the whole exercise, in seconds.
    ///
    /// Derived on demand and not part of the serialized entity. Saturates at
    /// `i64::MAX` instead of overflowing.
    ///
    /// There is no rest after the last cycle:
    /// ```text
    /// cycle ─ rest ─ cycle ─ rest ─ cycle
    ///   1             2             3        → 2 rests
    /// ```
    ///
    /// ## Example
    /// ```rust,ignore
    /// // 4 cycles, 60s rest
    /// assert_eq!(exercise.total_rest_seconds(), 180);
    /// ```
    pub fn total_rest_seconds(&self) -> i64 {
        if self.cycle_count > 0 {
            (self.cycle_count - 1).saturating_mul(self.rest_between_cycles)
        } else {
            0
        }
    }
}

// =============================================================================
// Write Models
// =============================================================================

/// Validated payload for creating a Diet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiet {
    pub goal: String,
    pub description: Option<String>,
}

/// Validated payload for creating a Meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeal {
    pub meal_type: String,
    pub quantity: i64,
    pub foods: Vec<String>,
    pub diet_id: Option<i64>,
}

/// Validated payload for creating an Exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub exercise_type: String,
    pub repetition_count: i64,
    pub cycle_count: i64,
    pub rest_between_cycles: i64,
    pub diet_id: Option<i64>,
}

/// Validated partial update for a Diet.
///
/// `description: Some(None)` clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietChanges {
    pub goal: Option<String>,
    pub description: Option<Option<String>>,
}

impl DietChanges {
    pub fn is_empty(&self) -> bool {
        self.goal.is_none() && self.description.is_none()
    }
}

/// Validated partial update for a Meal.
///
/// `diet_id: Some(None)` detaches the meal from its diet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealChanges {
    pub meal_type: Option<String>,
    pub quantity: Option<i64>,
    pub foods: Option<Vec<String>>,
    pub diet_id: Option<Option<i64>>,
}

impl MealChanges {
    pub fn is_empty(&self) -> bool {
        self.meal_type.is_none()
            && self.quantity.is_none()
            && self.foods.is_none()
            && self.diet_id.is_none()
    }
}

/// Validated partial update for an Exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseChanges {
    pub exercise_type: Option<String>,
    pub repetition_count: Option<i64>,
    pub cycle_count: Option<i64>,
    pub rest_between_cycles: Option<i64>,
    pub diet_id: Option<Option<i64>>,
}

impl ExerciseChanges {
    pub fn is_empty(&self) -> bool {
        self.exercise_type.is_none()
            && self.repetition_count.is_none()
            && self.cycle_count.is_none()
            && self.rest_between_cycles.is_none()
            && self.diet_id.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(cycles: i64, rest: i64) -> Exercise {
        Exercise {
            id: 1,
            exercise_type: "agachamento".to_string(),
            repetition_count: 12,
            cycle_count: cycles,
            rest_between_cycles: rest,
            diet_id: None,
            created_at: Utc::now(),
        }
    }

    fn meal(foods: &[&str]) -> Meal {
        Meal {
            id: 1,
            meal_type: "Almoço".to_string(),
            quantity: 300,
            foods: foods.iter().map(|f| f.to_string()).collect(),
            diet_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_meal_type_parse_ignores_case() {
        assert_eq!(MealType::parse("almoço"), Some(MealType::Lunch));
        assert_eq!(MealType::parse("Almoço"), Some(MealType::Lunch));
        assert_eq!(MealType::parse("CAFÉ DA MANHÃ"), Some(MealType::Breakfast));
        assert_eq!(MealType::parse("Pós-Treino"), Some(MealType::PostWorkout));
        assert_eq!(MealType::parse("brunch"), None);
        assert_eq!(MealType::parse(""), None);
    }

    #[test]
    fn test_meal_type_from_str_error_lists_labels() {
        let err = "brunch".parse::<MealType>().unwrap_err();
        assert_eq!(err.field(), "meal_type");
        assert!(err.to_string().contains("almoço"));
    }

    #[test]
    fn test_total_rest_seconds() {
        assert_eq!(exercise(4, 60).total_rest_seconds(), 180);
        assert_eq!(exercise(1, 60).total_rest_seconds(), 0);
        assert_eq!(exercise(0, 60).total_rest_seconds(), 0);
        assert_eq!(exercise(i64::MAX, 2).total_rest_seconds(), i64::MAX);
    }

    #[test]
    fn test_foods_with_skips_existing() {
        let m = meal(&["arroz", "feijão"]);
        assert_eq!(m.foods_with("salada"), vec!["arroz", "feijão", "salada"]);
        assert_eq!(m.foods_with("arroz"), vec!["arroz", "feijão"]);
    }

    #[test]
    fn test_foods_without_removes_every_occurrence() {
        let m = meal(&["arroz", "feijão", "arroz"]);
        assert_eq!(m.foods_without("arroz"), vec!["feijão"]);
        assert_eq!(m.foods_without("salada"), vec!["arroz", "feijão", "arroz"]);
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(DietChanges::default().is_empty());
        assert!(MealChanges::default().is_empty());
        assert!(ExerciseChanges::default().is_empty());

        let detach = MealChanges {
            diet_id: Some(None),
            ..Default::default()
        };
        assert!(!detach.is_empty());
    }

    #[test]
    fn test_summary_serializes_snake_case() {
        let diet = Diet {
            id: 3,
            goal: "perder peso".to_string(),
            description: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(DietSummary::new(diet, 2, 1)).unwrap();
        assert_eq!(json["meal_count"], 2);
        assert_eq!(json["exercise_count"], 1);
        assert!(json["description"].is_null());
    }
}
