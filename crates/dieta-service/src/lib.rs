//! # dieta-service: Controllers and API Boundary
//!
//! Turns raw requests into validated, persisted entities and renders the
//! outcome as a status code plus JSON envelope.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Dieta Layers                                   │
//! │                                                                         │
//! │  apps/cli (dieta)  ── raw JSON, ids ──┐                                 │
//! │                                       ▼                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 dieta-service (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   DietaApi ──► DietController / MealController /               │   │
//! │  │   (api.rs)     ExerciseController     (controller/)            │   │
//! │  │      │               │                                          │   │
//! │  │      │               ├──► dieta-core::validation  (field rules) │   │
//! │  │      │               ├──► lookup.rs              (references)   │   │
//! │  │      │               └──► dieta-db repositories  (one tx)       │   │
//! │  │      ▼                                                          │   │
//! │  │   ApiResponse { status, body }  (response.rs, error.rs)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`api`] - `DietaApi`, one method per endpoint
//! - [`controller`] - Per-entity orchestration
//! - [`lookup`] - Existence checks that need the store
//! - [`error`] - `ApiError` and status codes
//! - [`response`] - The `data`/`count`/`error` envelope

pub mod api;
pub mod controller;
pub mod error;
pub mod lookup;
pub mod response;

pub use api::DietaApi;
pub use controller::{DietController, ExerciseController, MealController};
pub use error::{ApiError, ErrorCode};
pub use response::ApiResponse;
