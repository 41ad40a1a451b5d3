//! # Diet Controller
//!
//! Diet lifecycle plus the association operations that attach existing
//! meals and exercises to a diet.
//!
//! ## Association Semantics
//! ```text
//! Meal 7 ── diet_id = 1
//!
//! add_meal(2, 7)
//!
//! Meal 7 ── diet_id = 2      (silently detached from diet 1)
//! ```
//! A child belongs to at most one diet, and the last association wins.

use dieta_core::validation::{validate_diet_changes, validate_new_diet};
use dieta_core::{
    CoreError, CoreResult, DietDetail, DietInput, DietSummary, EntityKind, Exercise, Meal,
};
use dieta_db::{CascadeReport, ChildStore, Database, EntityStore};
use tracing::{debug, info};

use crate::controller::{rejected, rejected_reference};
use crate::lookup::{exercise_exists, meal_exists, require};

/// Controller for diets.
///
/// ## Usage
/// ```rust,ignore
/// let diets = DietController::new(db.clone());
///
/// let created = diets.create(DietInput::from_json(r#"{"goal": "perder peso"}"#)?).await?;
/// let detail = diets.get_by_id(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DietController {
    db: Database,
}

impl DietController {
    pub fn new(db: Database) -> Self {
        DietController { db }
    }

    /// Validates and creates a diet.
    ///
    /// ## Returns
    /// The new diet as a summary (both counts are zero).
    pub async fn create(&self, input: DietInput) -> CoreResult<DietSummary> {
        let new = validate_new_diet(input).map_err(|e| rejected(EntityKind::Diet, e))?;

        let diet = self.db.diets().create(&new).await?;
        Ok(DietSummary::new(diet, 0, 0))
    }

    /// Every diet with its child counts.
    pub async fn get_all(&self) -> CoreResult<Vec<DietSummary>> {
        Ok(self.db.diets().summaries().await?)
    }

    /// One diet with its meals and exercises inlined.
    pub async fn get_by_id(&self, id: i64) -> CoreResult<DietDetail> {
        debug!(id, "Loading diet");

        self.db
            .diets()
            .detail(id)
            .await?
            .ok_or(CoreError::not_found(EntityKind::Diet, id))
    }

    /// Applies a partial update.
    ///
    /// ## Order of Checks
    /// 1. Diet exists, else `NotFound`
    /// 2. Present fields are valid, else `Validation`
    pub async fn update(&self, id: i64, input: DietInput) -> CoreResult<DietSummary> {
        let repo = self.db.diets();
        require(&repo, id).await?;

        let changes = validate_diet_changes(input).map_err(|e| rejected(EntityKind::Diet, e))?;

        repo.update(id, &changes).await?;
        repo.summary(id)
            .await?
            .ok_or(CoreError::not_found(EntityKind::Diet, id))
    }

    /// Deletes the diet together with its meals and exercises.
    pub async fn delete(&self, id: i64) -> CoreResult<CascadeReport> {
        let repo = self.db.diets();
        require(&repo, id).await?;

        Ok(repo.delete_cascade(id).await?)
    }

    /// Attaches an existing meal to this diet.
    ///
    /// ## Errors
    /// - Diet missing: `NotFound`
    /// - Meal missing: `Validation` on `meal_id`
    pub async fn add_meal(&self, diet_id: i64, meal_id: i64) -> CoreResult<Meal> {
        require(&self.db.diets(), diet_id).await?;

        meal_exists(&self.db, meal_id)
            .await
            .map_err(|e| rejected_reference(EntityKind::Meal, e))?;

        let meal = self.db.meals().set_parent(meal_id, Some(diet_id)).await?;
        info!(diet_id, meal_id, "Meal added to diet");
        Ok(meal)
    }

    /// Attaches an existing exercise to this diet.
    ///
    /// ## Errors
    /// - Diet missing: `NotFound`
    /// - Exercise missing: `Validation` on `exercise_id`
    pub async fn add_exercise(&self, diet_id: i64, exercise_id: i64) -> CoreResult<Exercise> {
        require(&self.db.diets(), diet_id).await?;

        exercise_exists(&self.db, exercise_id)
            .await
            .map_err(|e| rejected_reference(EntityKind::Exercise, e))?;

        let exercise = self.db.exercises().set_parent(exercise_id, Some(diet_id)).await?;
        info!(diet_id, exercise_id, "Exercise added to diet");
        Ok(exercise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dieta_core::{MealInput, Payload};
    use dieta_db::DbConfig;
    use serde_json::json;

    async fn setup() -> (Database, DietController) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (db.clone(), DietController::new(db))
    }

    fn diet_input(v: serde_json::Value) -> DietInput {
        DietInput::from_value(v).unwrap()
    }

    async fn create_meal(db: &Database) -> Meal {
        let input = MealInput::from_value(json!({
            "meal_type": "lanche",
            "quantity": 1,
            "foods": ["maçã"]
        }))
        .unwrap();
        let new = dieta_core::validation::validate_new_meal(input).unwrap();
        db.meals().create(&new).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_zero_counts() {
        let (_, diets) = setup().await;

        let summary = diets
            .create(diet_input(json!({ "goal": "perder peso" })))
            .await
            .unwrap();
        assert_eq!(summary.goal, "perder peso");
        assert_eq!(summary.meal_count, 0);
        assert_eq!(summary.exercise_count, 0);
    }

    #[tokio::test]
    async fn test_create_blank_goal_persists_nothing() {
        let (db, diets) = setup().await;

        let err = diets
            .create(diet_input(json!({ "goal": " ", "description": "x" })))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "goal"));
        assert_eq!(db.diets().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_before_validation() {
        let (_, diets) = setup().await;

        // Invalid payload, but the missing diet is reported first
        let err = diets
            .update(77, diet_input(json!({ "goal": "" })))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Diet, id: 77 }));
    }

    #[tokio::test]
    async fn test_add_meal_errors() {
        let (db, diets) = setup().await;
        let meal = create_meal(&db).await;

        let err = diets.add_meal(1, meal.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Diet, .. }));

        let diet = diets
            .create(diet_input(json!({ "goal": "perder peso" })))
            .await
            .unwrap();
        let err = diets.add_meal(diet.id, meal.id + 50).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "meal_id"));
    }

    #[tokio::test]
    async fn test_add_meal_moves_between_diets() {
        let (db, diets) = setup().await;
        let first = diets.create(diet_input(json!({ "goal": "a" }))).await.unwrap();
        let second = diets.create(diet_input(json!({ "goal": "b" }))).await.unwrap();
        let meal = create_meal(&db).await;

        diets.add_meal(first.id, meal.id).await.unwrap();
        let moved = diets.add_meal(second.id, meal.id).await.unwrap();

        // Last association wins; the first diet silently loses the meal
        assert_eq!(moved.diet_id, Some(second.id));
        assert!(diets.get_by_id(first.id).await.unwrap().meals.is_empty());
        assert_eq!(diets.get_by_id(second.id).await.unwrap().meals.len(), 1);
    }

    #[tokio::test]
    async fn test_update_returns_counts() {
        let (db, diets) = setup().await;
        let diet = diets.create(diet_input(json!({ "goal": "a" }))).await.unwrap();
        let meal = create_meal(&db).await;
        diets.add_meal(diet.id, meal.id).await.unwrap();

        let updated = diets
            .update(diet.id, diet_input(json!({ "description": "sem açúcar" })))
            .await
            .unwrap();
        assert_eq!(updated.goal, "a");
        assert_eq!(updated.description.as_deref(), Some("sem açúcar"));
        assert_eq!(updated.meal_count, 1);
    }

    #[tokio::test]
    async fn test_add_exercise_missing_exercise() {
        let (_, diets) = setup().await;
        let diet = diets.create(diet_input(json!({ "goal": "a" }))).await.unwrap();

        let err = diets.add_exercise(diet.id, 3).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "exercise_id"));
    }

    #[tokio::test]
    async fn test_delete_reports_cascade() {
        let (db, diets) = setup().await;
        let diet = diets.create(diet_input(json!({ "goal": "a" }))).await.unwrap();
        let meal = create_meal(&db).await;
        diets.add_meal(diet.id, meal.id).await.unwrap();

        let report = diets.delete(diet.id).await.unwrap();
        assert_eq!(report.meals_removed, 1);
        assert_eq!(report.exercises_removed, 0);

        let err = diets.delete(diet.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
