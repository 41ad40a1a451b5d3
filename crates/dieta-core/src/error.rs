//! # Error Types
//!
//! Domain-specific error types for dieta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dieta-core errors (this file)                                         │
//! │  ├── CoreError        - What every controller operation returns        │
//! │  │   ├── Validation   - 400                                            │
//! │  │   ├── NotFound     - 404                                            │
//! │  │   └── Persistence  - 500 (write rolled back)                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  dieta-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  dieta-service errors                                                  │
//! │  └── ApiError         - What the client sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError                           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                          ApiError → client                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation failure names the offending field
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::EntityKind;

// =============================================================================
// Core Error
// =============================================================================

/// Outcome of a failed controller operation.
///
/// Exactly three kinds exist, and each has one status at the API boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload broke a business rule. Nothing was written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The entity addressed by id does not exist.
    ///
    /// ## When This Occurs
    /// - `get_by_id` / `update` / `delete` on an unknown id
    /// - `add_meal` / `add_exercise` on an unknown diet
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: i64 },

    /// The store failed while writing or reading.
    ///
    /// Any open transaction was rolled back before this is returned.
    #[error("Persistence failure: {message}")]
    Persistence { message: String },
}

impl CoreError {
    /// Creates a NotFound error.
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        CoreError::NotFound { kind, id }
    }

    /// Creates a Persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        CoreError::Persistence {
            message: message.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant carries the name of the payload field that failed, so the
/// client can highlight it. `field()` returns it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, null, or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// List is missing or has no elements.
    #[error("{field} must contain at least one item")]
    EmptyList { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The payload references an entity that does not exist.
    ///
    /// ## When This Occurs
    /// - Meal/Exercise create or update with an unknown `diet_id`
    /// - `add_meal` / `add_exercise` with an unknown child id
    #[error("{kind} {id} referenced by {field} does not exist")]
    UnknownReference {
        field: String,
        kind: EntityKind,
        id: i64,
    },

    /// The payload was an object with no keys.
    #[error("no data provided")]
    EmptyPayload,

    /// Invalid format (e.g., not a JSON object, wrong JSON type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    ///
    /// Payload-level failures report `"payload"`.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::Negative { field }
            | ValidationError::EmptyList { field }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::UnknownReference { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
            ValidationError::EmptyPayload => "payload",
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::Negative {
            field: field.into(),
        }
    }

    pub fn empty_list(field: impl Into<String>) -> Self {
        ValidationError::EmptyList {
            field: field.into(),
        }
    }

    /// Unknown reference, reported on the kind's id field (`diet_id`, ...).
    pub fn unknown_reference(kind: EntityKind, id: i64) -> Self {
        ValidationError::UnknownReference {
            field: kind.id_field().to_string(),
            kind,
            id,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: "payload".to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::not_found(EntityKind::Meal, 42);
        assert_eq!(err.to_string(), "Meal not found: 42");

        let err = CoreError::persistence("disk I/O error");
        assert_eq!(err.to_string(), "Persistence failure: disk I/O error");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("goal").to_string(),
            "goal is required"
        );
        assert_eq!(
            ValidationError::negative("cycle_count").to_string(),
            "cycle_count must not be negative"
        );
        assert_eq!(
            ValidationError::unknown_reference(EntityKind::Diet, 9999).to_string(),
            "Diet 9999 referenced by diet_id does not exist"
        );

        let err = ValidationError::NotAllowed {
            field: "meal_type".to_string(),
            allowed: vec!["almoço".to_string(), "jantar".to_string()],
        };
        assert_eq!(err.to_string(), "meal_type must be one of: almoço, jantar");
    }

    #[test]
    fn test_validation_error_field() {
        assert_eq!(ValidationError::empty_list("foods").field(), "foods");
        assert_eq!(
            ValidationError::unknown_reference(EntityKind::Exercise, 1).field(),
            "exercise_id"
        );
        assert_eq!(ValidationError::EmptyPayload.field(), "payload");
        assert_eq!(ValidationError::malformed("expected object").field(), "payload");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("goal").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
