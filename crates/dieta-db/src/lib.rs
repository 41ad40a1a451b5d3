//! # dieta-db: Database Layer for Dieta
//!
//! This crate provides database access for Dieta.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Dieta Data Flow                                │
//! │                                                                         │
//! │  Controller (dieta-service), after validation passed                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     dieta-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (EntityStore) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ DietRepo      │    │ 001_initial_ │  │   │
//! │  │   │ WAL, FKs on   │    │ MealRepo      │    │   schema.sql │  │   │
//! │  │   │               │    │ ExerciseRepo  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/dieta/dieta.db  (or DIETA_DB_PATH)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - `EntityStore` and the three repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dieta_db::{Database, DbConfig, EntityStore};
//!
//! let db = Database::new(DbConfig::new("path/to/dieta.db")).await?;
//!
//! let meals = db.meals().get_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbStatus};

// Repository re-exports for convenience
pub use repository::{
    CascadeReport, ChildStore, DietRepository, EntityStore, ExerciseRepository, MealRepository,
};
