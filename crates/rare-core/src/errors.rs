//! Cross-cutting error types for RareAgent.
//!
//! Domain-specific errors (`RegistryError`, `RoleError`, `EngineError`) live in
//! their respective crates. This module holds the data-model validation error
//! and the failure taxonomy that every crate maps its errors onto.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while constructing or transitioning core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A workflow transition was attempted that is not allowed.
    #[error("Invalid state transition: {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Data failed validation (range, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failure classes a session can end with, or that a step can raise.
///
/// `ValidationRejected` is intentionally absent: a rejected verification is the
/// expected feedback signal, represented by `VerificationVerdict::Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Every target-discovery source failed. Session-fatal.
    DataSourceUnavailable,
    /// A reference registry could not be reached. Retryable.
    LookupUnavailable,
    /// A reasoning role returned nothing usable. Retryable, bounded.
    ReasoningUnavailable,
    /// The iteration ceiling was hit. Reported as advisory.
    IterationLimitExceeded,
    /// The caller cancelled the session.
    Cancelled,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataSourceUnavailable => "data_source_unavailable",
            Self::LookupUnavailable => "lookup_unavailable",
            Self::ReasoningUnavailable => "reasoning_unavailable",
            Self::IterationLimitExceeded => "iteration_limit_exceeded",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification used by step retry loops.
///
/// Errors that report `true` are retried with backoff; everything else fails
/// the step immediately.
pub trait Transient {
    fn is_transient(&self) -> bool;

    /// Failure class this error escalates to once retries are exhausted.
    fn failure_kind(&self) -> FailureKind;

    /// Server-requested delay before the next attempt, if any.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}
