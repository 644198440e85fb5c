//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// Input text was not JSON at all.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema-valid JSON that still failed to deserialize.
    #[error("Deserialization failed: {0}")]
    Deserialize(String),

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}
