//! # Meal Repository
//!
//! Database operations for meals.
//!
//! ## Storage
//! ```text
//! meals
//! ┌────┬───────────┬──────────┬──────────────────────┬─────────┬────────────┐
//! │ id │ meal_type │ quantity │ foods (JSON TEXT)    │ diet_id │ created_at │
//! ├────┼───────────┼──────────┼──────────────────────┼─────────┼────────────┤
//! │ 1  │ Almoço    │ 300      │ ["arroz","feijão"]   │ 1       │ 2026-...   │
//! │ 2  │ lanche    │ 1        │ ["banana"]           │ NULL    │ 2026-...   │
//! └────┴───────────┴──────────┴──────────────────────┴─────────┴────────────┘
//! ```
//! `foods` round-trips through `sqlx::types::Json`, so the column always
//! holds a JSON array.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{ChildStore, EntityStore};
use dieta_core::{EntityKind, Meal, MealChanges, NewMeal};

const SELECT_MEAL: &str =
    "SELECT id, meal_type, quantity, foods, diet_id, created_at FROM meals";

async fn find<'e, E>(executor: E, id: i64) -> DbResult<Option<Meal>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let meal = sqlx::query_as::<_, Meal>(&format!("{SELECT_MEAL} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(meal)
}

/// Meals of one diet. Shared with `DietRepository::detail`.
pub(crate) async fn find_by_parent<'e, E>(executor: E, diet_id: i64) -> DbResult<Vec<Meal>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let meals = sqlx::query_as::<_, Meal>(&format!("{SELECT_MEAL} WHERE diet_id = ?1 ORDER BY id"))
        .bind(diet_id)
        .fetch_all(executor)
        .await?;
    Ok(meals)
}

/// Repository for meal database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.meals();
///
/// let lunch = repo.create(&new_meal).await?;
/// let of_diet = repo.get_by_parent(diet.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MealRepository {
    pool: SqlitePool,
}

impl MealRepository {
    /// Creates a new MealRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MealRepository { pool }
    }
}

impl EntityStore for MealRepository {
    type Entity = Meal;
    type New = NewMeal;
    type Changes = MealChanges;

    const KIND: EntityKind = EntityKind::Meal;

    async fn create(&self, new: &NewMeal) -> DbResult<Meal> {
        debug!(meal_type = %new.meal_type, diet_id = ?new.diet_id, "Creating meal");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let id = sqlx::query(
            "INSERT INTO meals (meal_type, quantity, foods, diet_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&new.meal_type)
        .bind(new.quantity)
        .bind(Json(&new.foods))
        .bind(new.diet_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let meal = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Meal created");
        Ok(meal)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Meal>> {
        debug!(id, "Fetching meal");
        find(&self.pool, id).await
    }

    async fn get_all(&self) -> DbResult<Vec<Meal>> {
        let meals = sqlx::query_as::<_, Meal>(&format!("{SELECT_MEAL} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = meals.len(), "Listed meals");
        Ok(meals)
    }

    async fn update(&self, id: i64, changes: &MealChanges) -> DbResult<Meal> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let current = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        if changes.is_empty() {
            return Ok(current);
        }

        let meal_type = changes.meal_type.clone().unwrap_or(current.meal_type);
        let quantity = changes.quantity.unwrap_or(current.quantity);
        let foods = changes.foods.clone().unwrap_or(current.foods);
        let diet_id = changes.diet_id.unwrap_or(current.diet_id);

        sqlx::query(
            "UPDATE meals SET meal_type = ?1, quantity = ?2, foods = ?3, diet_id = ?4 \
             WHERE id = ?5",
        )
        .bind(&meal_type)
        .bind(quantity)
        .bind(Json(&foods))
        .bind(diet_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let meal = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Meal updated");
        Ok(meal)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let removed = sqlx::query("DELETE FROM meals WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(DbError::not_found(Self::KIND, id));
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, "Meal deleted");
        Ok(())
    }
}

impl ChildStore for MealRepository {
    async fn get_by_parent(&self, diet_id: i64) -> DbResult<Vec<Meal>> {
        debug!(diet_id, "Listing meals of diet");
        find_by_parent(&self.pool, diet_id).await
    }

    async fn set_parent(&self, id: i64, diet_id: Option<i64>) -> DbResult<Meal> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let updated = sqlx::query("UPDATE meals SET diet_id = ?1 WHERE id = ?2")
            .bind(diet_id)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(DbError::not_found(Self::KIND, id));
        }

        let meal = find(&mut *tx, id)
            .await?
            .ok_or(DbError::not_found(Self::KIND, id))?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id, diet_id = ?diet_id, "Meal attached to diet");
        Ok(meal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
