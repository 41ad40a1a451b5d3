//! # Repository Module
//!
//! Database repository implementations for Dieta.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Capabilities                                   │
//! │                                                                         │
//! │  EntityStore (every entity)                                            │
//! │  ├── create(&new)          → entity with id + created_at               │
//! │  ├── get_by_id(id)         → Option<entity>                            │
//! │  ├── get_all()             → Vec<entity>                               │
//! │  ├── update(id, &changes)  → entity (only given fields change)         │
//! │  ├── delete(id)                                                        │
//! │  └── exists(id)                                                        │
//! │                                                                         │
//! │  ChildStore: EntityStore (Meal, Exercise)                              │
//! │  ├── get_by_parent(diet_id)                                            │
//! │  └── set_parent(id, diet_id)                                           │
//! │                                                                         │
//! │  DietRepository          MealRepository        ExerciseRepository      │
//! │  impl EntityStore        impl ChildStore       impl ChildStore         │
//! │  + delete_cascade                                                      │
//! │  + summaries / detail                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic Writes
//! Every write opens a transaction with `pool.begin()`, runs its statements
//! on `&mut *tx`, and finishes with `tx.commit()`. Returning early with `?`
//! drops the transaction, which rolls it back. Nothing inside a write
//! transaction touches the pool again: the in-memory test pool has exactly
//! one connection and the transaction is holding it.
//!
//! ## Available Repositories
//!
//! - [`DietRepository`] - Diet CRUD, cascading delete, summaries
//! - [`MealRepository`] - Meal CRUD and diet association
//! - [`ExerciseRepository`] - Exercise CRUD and diet association

pub mod diet;
pub mod exercise;
pub mod meal;

pub use diet::{CascadeReport, DietRepository};
pub use exercise::ExerciseRepository;
pub use meal::MealRepository;

use dieta_core::EntityKind;

use crate::error::DbResult;

/// Generic persistence capability shared by all entity types.
///
/// Existence lookups in dieta-service are generic over this trait; the
/// controllers call the concrete repositories for everything else.
#[allow(async_fn_in_trait)]
pub trait EntityStore {
    /// The stored entity.
    type Entity;
    /// Validated create payload.
    type New;
    /// Validated partial update.
    type Changes;

    /// Which entity this store holds (for NotFound errors and logs).
    const KIND: EntityKind;

    /// Assigns id and timestamp, persists, and returns the stored entity.
    async fn create(&self, new: &Self::New) -> DbResult<Self::Entity>;

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Self::Entity>>;

    /// All entities, oldest first.
    async fn get_all(&self) -> DbResult<Vec<Self::Entity>>;

    /// Applies the given fields only.
    ///
    /// Fails with `DbError::NotFound` if no row has this id. An empty change
    /// set writes nothing and returns the current entity.
    async fn update(&self, id: i64, changes: &Self::Changes) -> DbResult<Self::Entity>;

    /// Fails with `DbError::NotFound` if no row has this id.
    async fn delete(&self, id: i64) -> DbResult<()>;

    async fn exists(&self, id: i64) -> DbResult<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }
}

/// Entities that may belong to a Diet.
#[allow(async_fn_in_trait)]
pub trait ChildStore: EntityStore {
    /// Children of one diet, oldest first.
    async fn get_by_parent(&self, diet_id: i64) -> DbResult<Vec<Self::Entity>>;

    /// Points the child at `diet_id` (or detaches it with `None`).
    ///
    /// A child already attached elsewhere is moved; the last write wins.
    async fn set_parent(&self, id: i64, diet_id: Option<i64>) -> DbResult<Self::Entity>;
}
