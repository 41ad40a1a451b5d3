//! # dieta-core: Pure Domain Logic for Dieta
//!
//! This crate holds the entity types and every validation rule that can be
//! decided from a payload alone. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Dieta Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Client (`dieta` CLI / desktop UI)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON payloads                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          dieta-service: Controllers + API envelope              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dieta-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   input   │  │ validation│  │   error   │  │   │
//! │  │   │   Diet    │  │  Field<T> │  │  rules    │  │ CoreError │  │   │
//! │  │   │   Meal    │  │  *Input   │  │  New*     │  │ Validation│  │   │
//! │  │   │ Exercise  │  │  Foods    │  │  *Changes │  │  Error    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dieta-db (Database Layer)                    │   │
//! │  │            SQLite, migrations, EntityStore repositories         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities, views and write models
//! - [`input`] - Untrusted JSON payloads with absent/null/value fields
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dieta_core::input::{DietInput, Payload};
//! use dieta_core::validation::validate_new_diet;
//!
//! let input = DietInput::from_json(r#"{"goal": "perder peso"}"#).unwrap();
//! let diet = validate_new_diet(input).unwrap();
//! assert_eq!(diet.goal, "perder peso");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod input;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use input::{DietInput, ExerciseInput, Field, Foods, MealInput, Payload};
pub use types::*;
