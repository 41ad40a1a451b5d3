//! # Diet Repository
//!
//! Database operations for diets, including the cascading delete.
//!
//! ## Cascade Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    delete_cascade(diet_id)                              │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    DELETE FROM meals     WHERE diet_id = ?   → meals_removed           │
//! │    DELETE FROM exercises WHERE diet_id = ?   → exercises_removed       │
//! │    DELETE FROM diets     WHERE id = ?        → 0 rows? NotFound        │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure before COMMIT drops the transaction: nothing is removed.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Views
//! - [`DietRepository::summaries`] - every diet with child counts
//! - [`DietRepository::detail`] - one diet with its meals and exercises,
//!   read inside a single transaction so the three reads agree

use chrono::Utc;
use serde::Serialize;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{exercise, meal, EntityStore};
use dieta_core::{Diet, DietChanges, DietDetail, DietSummary, EntityKind, NewDiet};

const SELECT_DIET: &str = "SELECT id, goal, description, created_at FROM diets";

const SELECT_SUMMARY: &str = r#"
    SELECT
        d.id,
        d.goal,
        d.description,
        d.created_at,
        (SELECT COUNT(*) FROM meals m WHERE m.diet_id = d.id) AS meal_count,
        (SELECT COUNT(*) FROM exercises e WHERE e.diet_id = d.id) AS exercise_count
    FROM diets d
"#;

async fn find<'e, E>(executor: E, id: i64) -> DbResult<Option<Diet>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let diet = sqlx::query_as::<_, Diet>(&format!("{SELECT_DIET} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(diet)
}

/// What a cascading delete removed besides the diet itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub meals_removed: u64,
    pub exercises_removed: u64,
}

/// Repository for diet database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.diets();
///
/// let diet = repo.create(&NewDiet { goal: "perder peso".into(), description: None }).await?;
/// let report = repo.delete_cascade(diet.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DietRepository {
    pool: SqlitePool,
}

impl DietRepository {
    /// Creates a new DietRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DietRepository { pool }
    }

    /// Deletes a diet and every meal and exercise attached to it.
    ///
    /// ## Returns
    /// * `Ok(CascadeReport)` - how many children went with it
    /// * `Err(DbError::NotFound)` - no diet has this id (nothing removed)
    pub async fn delete_cascade(&self, id: i64) -> DbResult<CascadeReport> {
        debug!(id, "Deleting diet with children");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let meals_removed = sqlx::query("DELETE FROM meals WHERE diet_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let exercises_removed = sqlx::query("DELETE FROM exercises WHERE diet_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let diets_removed = sqlx::query("DELETE FROM diets WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if diets_removed == 0 {
            return Err(DbError::not_found(EntityKind::Diet, id));
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, meals_removed, exercises_removed, "Diet deleted");
        Ok(CascadeReport {
            meals_removed,
            exercises_removed,
        })
    }

    /// Every diet with its meal and exercise counts, oldest first.
    pub async fn summaries(&self) -> DbResult<Vec<DietSummary>> {
        let summaries = sqlx::query_as::<_, DietSummary>(&format!("{SELECT_SUMMARY} ORDER BY d.id"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = summaries.len(), "Listed diets");
        Ok(summaries)
    }

    /// One diet with its meal and exercise counts.
    pub async fn summary(&self, id: i64) -> DbResult<Option<DietSummary>> {
        let summary = sqlx::query_as::<_, DietSummary>(&format!("{SELECT_SUMMARY} WHERE d.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(summary)
    }

    /// One diet with its meals and exercises inlined.
    pub async fn detail(&self, id: i64) -> DbResult<Option<DietDetail>> {
        debug!(id, "Fetching diet detail");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let Some(diet) = find(&mut *tx, id).await? else {
            return Ok(None);
        };
        let meals = meal::find_by_parent(&mut *tx, id).await?;
        let exercises = exercise::find_by_parent(&mut *tx, id).await?;

        tx.commit().await.map_err(DbError::transaction)?;

        Ok(Some(DietDetail::new(diet, meals, exercises)))
    }

    /// Number of diets.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM diets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

impl EntityStore for DietRepository {
    type Entity = Diet;
    type New = NewDiet;
    type Changes = DietChanges;

    const KIND: EntityKind = EntityKind::Diet;

    async fn create(&self, new: &NewDiet) -> DbResult<Diet> {
        debug!(goal = %new.goal, "Creating diet");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let id = sqlx::query("INSERT INTO diets (goal, description, created_at) VALUES (?1, ?2, ?3)")
            .bind(&new.goal)
            .bind(&new.description)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let diet = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Diet created");
        Ok(diet)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Diet>> {
        debug!(id, "Fetching diet");
        find(&self.pool, id).await
    }

    async fn get_all(&self) -> DbResult<Vec<Diet>> {
        let diets = sqlx::query_as::<_, Diet>(&format!("{SELECT_DIET} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(diets)
    }

    async fn update(&self, id: i64, changes: &DietChanges) -> DbResult<Diet> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let current = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        if changes.is_empty() {
            return Ok(current);
        }

        let goal = changes.goal.clone().unwrap_or(current.goal);
        let description = changes
            .description
            .clone()
            .unwrap_or(current.description);

        sqlx::query("UPDATE diets SET goal = ?1, description = ?2 WHERE id = ?3")
            .bind(&goal)
            .bind(&description)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let diet = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Diet updated");
        Ok(diet)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        self.delete_cascade(id).await.map(|_| ())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
