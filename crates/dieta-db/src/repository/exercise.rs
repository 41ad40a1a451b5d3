//! # Exercise Repository
//!
//! Database operations for exercises. Mirrors the meal repository; the
//! columns are all scalar so no JSON handling is involved.

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{ChildStore, EntityStore};
use dieta_core::{EntityKind, Exercise, ExerciseChanges, NewExercise};

const SELECT_EXERCISE: &str = "SELECT id, exercise_type, repetition_count, cycle_count, \
     rest_between_cycles, diet_id, created_at FROM exercises";

async fn find<'e, E>(executor: E, id: i64) -> DbResult<Option<Exercise>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let exercise = sqlx::query_as::<_, Exercise>(&format!("{SELECT_EXERCISE} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(exercise)
}

/// Exercises of one diet. Shared with `DietRepository::detail`.
pub(crate) async fn find_by_parent<'e, E>(executor: E, diet_id: i64) -> DbResult<Vec<Exercise>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let exercises =
        sqlx::query_as::<_, Exercise>(&format!("{SELECT_EXERCISE} WHERE diet_id = ?1 ORDER BY id"))
            .bind(diet_id)
            .fetch_all(executor)
            .await?;
    Ok(exercises)
}

/// Repository for exercise database operations.
#[derive(Debug, Clone)]
pub struct ExerciseRepository {
    pool: SqlitePool,
}

impl ExerciseRepository {
    /// Creates a new ExerciseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExerciseRepository { pool }
    }
}

impl EntityStore for ExerciseRepository {
    type Entity = Exercise;
    type New = NewExercise;
    type Changes = ExerciseChanges;

    const KIND: EntityKind = EntityKind::Exercise;

    async fn create(&self, new: &NewExercise) -> DbResult<Exercise> {
        debug!(
            exercise_type = %new.exercise_type,
            diet_id = ?new.diet_id,
            "Creating exercise"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let id = sqlx::query(
            "INSERT INTO exercises \
             (exercise_type, repetition_count, cycle_count, rest_between_cycles, diet_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&new.exercise_type)
        .bind(new.repetition_count)
        .bind(new.cycle_count)
        .bind(new.rest_between_cycles)
        .bind(new.diet_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let exercise = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Exercise created");
        Ok(exercise)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Exercise>> {
        debug!(id, "Fetching exercise");
        find(&self.pool, id).await
    }

    async fn get_all(&self) -> DbResult<Vec<Exercise>> {
        let exercises = sqlx::query_as::<_, Exercise>(&format!("{SELECT_EXERCISE} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = exercises.len(), "Listed exercises");
        Ok(exercises)
    }

    async fn update(&self, id: i64, changes: &ExerciseChanges) -> DbResult<Exercise> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let current = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        if changes.is_empty() {
            return Ok(current);
        }

        let exercise_type = changes
            .exercise_type
            .clone()
            .unwrap_or(current.exercise_type);
        let repetition_count = changes.repetition_count.unwrap_or(current.repetition_count);
        let cycle_count = changes.cycle_count.unwrap_or(current.cycle_count);
        let rest_between_cycles = changes
            .rest_between_cycles
            .unwrap_or(current.rest_between_cycles);
        let diet_id = changes.diet_id.unwrap_or(current.diet_id);

        sqlx::query(
            "UPDATE exercises SET exercise_type = ?1, repetition_count = ?2, cycle_count = ?3, \
             rest_between_cycles = ?4, diet_id = ?5 WHERE id = ?6",
        )
        .bind(&exercise_type)
        .bind(repetition_count)
        .bind(cycle_count)
        .bind(rest_between_cycles)
        .bind(diet_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let exercise = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Exercise updated");
        Ok(exercise)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let removed = sqlx::query("DELETE FROM exercises WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(DbError::not_found(Self::KIND, id));
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Exercise deleted");
        Ok(())
    }
}

impl ChildStore for ExerciseRepository {
    async fn get_by_parent(&self, diet_id: i64) -> DbResult<Vec<Exercise>> {
        debug!(diet_id, "Listing exercises of diet");
        find_by_parent(&self.pool, diet_id).await
    }

    async fn set_parent(&self, id: i64, diet_id: Option<i64>) -> DbResult<Exercise> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let updated = sqlx::query("UPDATE exercises SET diet_id = ?1 WHERE id = ?2")
            .bind(diet_id)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(DbError::not_found(Self::KIND, id));
        }

        let exercise = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, diet_id = ?diet_id, "Exercise attached to diet");
        Ok(exercise)
    }
}
