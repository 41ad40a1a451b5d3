//! # API Error Type
//!
//! The failure a client sees, and the status code it maps to.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Dieta                                  │
//! │                                                                         │
//! │  dieta-core               dieta-db                dieta-service         │
//! │  ──────────               ────────                ─────────────         │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │                    ▼                                                    │
//! │                CoreError ◄── DbError (logged) ──┐                       │
//! │                    │                            │                       │
//! │                    ▼                            │                       │
//! │                 ApiError ───────────────────────┴──► { "error": ...,    │
//! │                                                        "field": ... }   │
//! │                                                                         │
//! │  Validation   → VALIDATION_ERROR   400                                 │
//! │  NotFound     → NOT_FOUND          404                                 │
//! │  Persistence  → DATABASE_ERROR     500  (details only in the log)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dieta_core::CoreError;
use serde::Serialize;

/// Message shown to clients for every persistence failure.
pub const PERSISTENCE_MESSAGE: &str = "Database operation failed";

/// API error returned from every failing operation.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "error": "quantity must not be negative",
///   "field": "quantity"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub error: String,

    /// Offending input field, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::DatabaseError | ErrorCode::Internal => 500,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        ApiError {
            code,
            error: error.into(),
            field: None,
        }
    }

    /// Creates a validation error scoped to one field.
    pub fn validation(error: impl Into<String>, field: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            error: error.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a not found error.
    pub fn not_found(error: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, error)
    }

    /// Creates a persistence error with the generic client message.
    pub fn database() -> Self {
        ApiError::new(ErrorCode::DatabaseError, PERSISTENCE_MESSAGE)
    }

    /// Creates an internal error.
    pub fn internal(error: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, error)
    }

    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

/// Converts controller errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => {
                let field = e.field().to_string();
                ApiError::validation(e.to_string(), field)
            }
            not_found @ CoreError::NotFound { .. } => ApiError::not_found(not_found.to_string()),
            // Already logged where the database error was converted
            CoreError::Persistence { .. } => ApiError::database(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.error)
    }
}

impl std::error::Error for ApiError {}
