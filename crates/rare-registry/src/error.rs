//! Registry error types.

use std::time::Duration;

use rare_core::errors::{FailureKind, Transient};
use thiserror::Error;

/// Errors that can occur when querying reference registries.
///
/// "Resolved to nothing" is never an error: lookups return `Ok(None)` or
/// `Ok(false)` for that. Every variant here means the registry could not
/// answer.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the registry.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a registry response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The registry returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// An offline snapshot could not be read.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl Transient for RegistryError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_decode() && !e.is_builder(),
            Self::Api { status, .. } => *status >= 500 || *status == 408,
            Self::RateLimited { .. } => true,
            Self::Parse(_) | Self::Snapshot(_) => false,
        }
    }

    fn failure_kind(&self) -> FailureKind {
        FailureKind::LookupUnavailable
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(Duration::from_secs(*retry_after_secs)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = RegistryError::Api {
            status: 503,
            message: String::new(),
        };
        assert!(err.is_transient());
        assert_eq!(err.failure_kind(), FailureKind::LookupUnavailable);
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = RegistryError::Api {
            status: 400,
            message: "PUGREST.BadRequest".into(),
        };
        assert!(!err.is_transient());
        assert!(!RegistryError::Parse("bad json".into()).is_transient());
    }

    #[test]
    fn rate_limit_carries_delay() {
        let err = RegistryError::RateLimited {
            retry_after_secs: 7,
        };
        assert!(err.is_transient());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    }
}
