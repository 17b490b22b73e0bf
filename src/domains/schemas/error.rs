//! Schema-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the schema catalog.
///
/// Every variant is fatal at startup: the gateway cannot serve requests
/// without a complete, well-formed catalog.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema source could not be read.
    #[error("Cannot read schema source '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema source is not valid JSON.
    #[error("Error decoding schema source: {0}")]
    Decode(#[from] serde_json::Error),

    /// The schema source is valid JSON but not a list of definitions.
    #[error("Malformed schema source: {0}")]
    Malformed(String),

    /// Two definitions share the same name.
    #[error("Duplicate schema name '{0}'")]
    Duplicate(String),

    /// A definition's parameter contract is not a usable JSON Schema.
    #[error("Invalid parameter contract for '{name}': {reason}")]
    InvalidContract { name: String, reason: String },
}

impl SchemaError {
    /// Create a new "malformed" error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a new "invalid contract" error.
    pub fn invalid_contract(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidContract {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
