//! Schemas domain module.
//!
//! This module owns the parameter contracts declared for every tool. The
//! catalog is loaded once at startup and is read-only afterwards; the
//! validator checks a parameter value against a contract before any handler
//! sees it.
//!
//! ## Architecture
//!
//! - `catalog.rs` - Loading and indexing of schema definitions
//! - `validator.rs` - Compiled JSON Schema parameter contracts
//! - `error.rs` - Schema-specific error types

mod catalog;
mod error;
mod validator;

pub use catalog::{SchemaCatalog, ToolSchema};
pub use error::SchemaError;
pub use validator::{ParameterValidator, ValidationFailure, Violation};
