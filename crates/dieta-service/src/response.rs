//! # Response Envelope
//!
//! Every operation answers with a status code and a JSON body.
//!
//! ```text
//! 201  { "data": { "id": 1, ... }, "message": "Diet created" }
//! 200  { "data": [ ... ], "count": 2 }
//! 404  { "code": "NOT_FOUND", "error": "Meal not found: 9" }
//! 400  { "code": "VALIDATION_ERROR", "error": "...", "field": "quantity" }
//! ```

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::error;

use crate::error::ApiError;

/// Status code plus body, ready to hand to any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// `200 { "data": ... }`
    pub fn ok<T: Serialize>(data: &T) -> Self {
        Self::envelope(200, data, None)
    }

    /// `200 { "data": ..., "message": ... }`
    pub fn ok_with_message<T: Serialize>(data: &T, message: &str) -> Self {
        Self::envelope(200, data, Some(message))
    }

    /// `201 { "data": ..., "message": ... }`
    pub fn created<T: Serialize>(data: &T, message: &str) -> Self {
        Self::envelope(201, data, Some(message))
    }

    /// `200 { "data": [...], "count": n }`
    pub fn list<T: Serialize>(items: &[T]) -> Self {
        match serde_json::to_value(items) {
            Ok(data) => ApiResponse {
                status: 200,
                body: json!({ "data": data, "count": items.len() }),
            },
            Err(e) => Self::unserializable(e),
        }
    }

    pub fn from_error(err: ApiError) -> Self {
        let status = err.status();
        match serde_json::to_value(&err) {
            Ok(body) => ApiResponse { status, body },
            Err(e) => Self::unserializable(e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    fn envelope<T: Serialize>(status: u16, data: &T, message: Option<&str>) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(e) => return Self::unserializable(e),
        };

        let mut body = Map::new();
        body.insert("data".to_string(), data);
        if let Some(message) = message {
            body.insert("message".to_string(), Value::String(message.to_string()));
        }

        ApiResponse {
            status,
            body: Value::Object(body),
        }
    }

    fn unserializable(e: serde_json::Error) -> Self {
        error!("Failed to serialize response: {}", e);
        let err = ApiError::internal("Failed to serialize response");
        ApiResponse {
            status: err.status(),
            body: json!({ "code": "INTERNAL", "error": err.error }),
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        ApiResponse::from_error(err)
    }
}
