//! # Exercise Controller

use dieta_core::validation::{validate_exercise_changes, validate_new_exercise};
use dieta_core::{CoreResult, EntityKind, Exercise, ExerciseInput};
use dieta_db::{ChildStore, Database, EntityStore};
use tracing::debug;

use crate::controller::{check_diet_reference, rejected};
use crate::lookup::require;

/// Controller for exercises.
#[derive(Debug, Clone)]
pub struct ExerciseController {
    db: Database,
}

impl ExerciseController {
    pub fn new(db: Database) -> Self {
        ExerciseController { db }
    }

    /// Validates and creates an exercise, optionally attached to a diet.
    pub async fn create(&self, input: ExerciseInput) -> CoreResult<Exercise> {
        let new =
            validate_new_exercise(input).map_err(|e| rejected(EntityKind::Exercise, e))?;
        check_diet_reference(&self.db, EntityKind::Exercise, new.diet_id).await?;

        let exercise = self.db.exercises().create(&new).await?;
        debug!(
            id = exercise.id,
            total_rest_seconds = exercise.total_rest_seconds(),
            "Exercise planned"
        );
        Ok(exercise)
    }

    pub async fn get_all(&self) -> CoreResult<Vec<Exercise>> {
        Ok(self.db.exercises().get_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> CoreResult<Exercise> {
        require(&self.db.exercises(), id).await
    }

    /// Exercises attached to one diet. An unknown diet has none.
    pub async fn get_by_diet(&self, diet_id: i64) -> CoreResult<Vec<Exercise>> {
        Ok(self.db.exercises().get_by_parent(diet_id).await?)
    }

    pub async fn update(&self, id: i64, input: ExerciseInput) -> CoreResult<Exercise> {
        let repo = self.db.exercises();
        require(&repo, id).await?;

        let changes =
            validate_exercise_changes(input).map_err(|e| rejected(EntityKind::Exercise, e))?;
        if let Some(diet_id) = changes.diet_id {
            check_diet_reference(&self.db, EntityKind::Exercise, diet_id).await?;
        }

        Ok(repo.update(id, &changes).await?)
    }

    pub async fn delete(&self, id: i64) -> CoreResult<()> {
        let repo = self.db.exercises();
        require(&repo, id).await?;

        Ok(repo.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dieta_core::{CoreError, Payload, ValidationError};
    use dieta_db::DbConfig;
    use serde_json::json;

    async fn setup() -> ExerciseController {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ExerciseController::new(db)
    }

    fn input(v: serde_json::Value) -> ExerciseInput {
        ExerciseInput::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let exercises = setup().await;

        let squat = exercises
            .create(input(json!({
                "exercise_type": "agachamento",
                "repetition_count": 12,
                "cycle_count": 4,
                "rest_between_cycles": 60
            })))
            .await
            .unwrap();
        assert_eq!(squat.total_rest_seconds(), 180);

        let updated = exercises
            .update(squat.id, input(json!({ "cycle_count": 0 })))
            .await
            .unwrap();
        assert_eq!(updated.cycle_count, 0);
        assert_eq!(updated.repetition_count, 12);
        assert_eq!(updated.total_rest_seconds(), 0);
    }

    #[tokio::test]
    async fn test_negative_count_rejected() {
        let exercises = setup().await;

        let err = exercises
            .create(input(json!({
                "exercise_type": "flexão",
                "repetition_count": 10,
                "cycle_count": -1,
                "rest_between_cycles": 30
            })))
            .await
            .unwrap_err();
        match err {
            CoreError::Validation(e) => assert_eq!(e, ValidationError::negative("cycle_count")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(exercises.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_diet_and_missing_exercise() {
        let exercises = setup().await;

        let err = exercises
            .create(input(json!({
                "exercise_type": "prancha",
                "repetition_count": 1,
                "cycle_count": 5,
                "rest_between_cycles": 30,
                "diet_id": 12
            })))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "diet_id"));

        let err = exercises.delete(12).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Exercise, id: 12 }));
        assert!(exercises.get_by_diet(12).await.unwrap().is_empty());
    }
}
