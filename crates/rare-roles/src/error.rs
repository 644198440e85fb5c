//! Role error types.

use std::time::Duration;

use rare_core::errors::{FailureKind, Transient};
use rare_schema::SchemaError;
use thiserror::Error;

/// Errors raised by the explorer, proponent and skeptic roles.
#[derive(Debug, Error)]
pub enum RoleError {
    /// Every target source failed and the caller supplied no hints.
    #[error("no target source available: {0}")]
    DataSourceUnavailable(String),

    /// The reasoning endpoint has no API key or model.
    #[error("reasoning endpoint not configured (set GROQ_API_KEY or reasoning.api_key)")]
    NotConfigured,

    /// HTTP transport error talking to the reasoning endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The reasoning endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The completion envelope was empty or not what an OpenAI-compatible
    /// endpoint returns.
    #[error("malformed completion: {0}")]
    Malformed(String),

    /// The completion did not satisfy the response schema.
    #[error("response rejected: {0}")]
    Schema(#[from] SchemaError),
}

impl Transient for RoleError {
    fn is_transient(&self) -> bool {
        match self {
            Self::DataSourceUnavailable(_) | Self::NotConfigured => false,
            Self::Http(e) => !e.is_builder(),
            Self::Api { status, .. } => *status >= 500 || *status == 408,
            Self::RateLimited { .. } | Self::Malformed(_) | Self::Schema(_) => true,
        }
    }

    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::DataSourceUnavailable(_) => FailureKind::DataSourceUnavailable,
            _ => FailureKind::ReasoningUnavailable,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(Duration::from_secs(*retry_after_secs)),
            _ => None,
        }
    }
}
