//! # Controllers
//!
//! One controller per entity type. Every mutating operation follows the
//! same pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Controller Pipeline                                 │
//! │                                                                         │
//! │  update(id, input)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Addressed entity exists?        no  → NotFound          (404)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Field rules (dieta-core)        no  → ValidationError   (400)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. References exist? (lookup.rs)   no  → ValidationError   (400)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Repository write (one tx)      err → Persistence        (500)      │
//! │       │                                  (transaction rolled back)      │
//! │       ▼                                                                 │
//! │  Ok(entity)                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing reaches step 4 unless steps 1-3 passed.

pub mod diet;
pub mod exercise;
pub mod meal;

pub use diet::DietController;
pub use exercise::ExerciseController;
pub use meal::MealController;

use dieta_core::{CoreError, CoreResult, EntityKind, ValidationError};
use dieta_db::Database;
use tracing::warn;

use crate::lookup::diet_exists;

/// Logs a rejected payload and lifts it into the controller error.
pub(crate) fn rejected(kind: EntityKind, err: ValidationError) -> CoreError {
    warn!(kind = %kind, field = err.field(), reason = %err, "Payload rejected");
    CoreError::Validation(err)
}

/// `rejected` for lookup results, which may also carry store failures.
pub(crate) fn rejected_reference(kind: EntityKind, err: CoreError) -> CoreError {
    match err {
        CoreError::Validation(e) => rejected(kind, e),
        other => other,
    }
}

/// Checks the `diet_id` carried by a meal or exercise payload.
pub(crate) async fn check_diet_reference(
    db: &Database,
    kind: EntityKind,
    diet_id: Option<i64>,
) -> CoreResult<()> {
    match diet_id {
        Some(id) => diet_exists(db, id)
            .await
            .map_err(|e| rejected_reference(kind, e)),
        None => Ok(()),
    }
}
