//! # Existence Lookups
//!
//! The validation rules that need the store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Addressed entity missing (the id in the path)   → CoreError::NotFound  │
//! │    update(42, ..), delete(42), add_meal(42, ..)                         │
//! │                                                                         │
//! │  Referenced entity missing (an id in the payload) → ValidationError     │
//! │    { "diet_id": 9999 }, add_meal(.., 9999)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups run on the pool, outside the write transaction that follows
//! them. A referenced diet deleted in between is caught by the foreign key
//! and surfaces as a persistence failure.

use dieta_core::{CoreError, CoreResult, ValidationError};
use dieta_db::{Database, EntityStore};

/// Loads the addressed entity or fails with `NotFound`.
pub async fn require<S: EntityStore>(store: &S, id: i64) -> CoreResult<S::Entity> {
    store
        .get_by_id(id)
        .await?
        .ok_or(CoreError::not_found(S::KIND, id))
}

/// Fails with a validation error on the reference field (`diet_id`,
/// `meal_id`, ...) when the referenced entity does not exist.
pub async fn referenced<S: EntityStore>(store: &S, id: i64) -> CoreResult<()> {
    if store.exists(id).await? {
        Ok(())
    } else {
        Err(ValidationError::unknown_reference(S::KIND, id).into())
    }
}

pub async fn diet_exists(db: &Database, id: i64) -> CoreResult<()> {
    referenced(&db.diets(), id).await
}

pub async fn meal_exists(db: &Database, id: i64) -> CoreResult<()> {
    referenced(&db.meals(), id).await
}

pub async fn exercise_exists(db: &Database, id: i64) -> CoreResult<()> {
    referenced(&db.exercises(), id).await
}
