//! Engine error types.

use rare_core::enums::WorkflowState;
use rare_core::errors::{CoreError, FailureKind};
use thiserror::Error;

/// Errors that stop a session step.
///
/// The orchestrator never returns these to callers: every one of them is
/// folded into `SessionResult::InfrastructureFailure`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A step failed after exhausting its retries, or failed non-transiently.
    #[error("{step} failed after {attempts} attempt(s): {reason}")]
    Step {
        step: &'static str,
        kind: FailureKind,
        attempts: u32,
        reason: String,
    },

    /// The session was cancelled by its caller.
    #[error("session cancelled")]
    Cancelled,

    /// The state machine refused a transition, or a result failed to build.
    #[error(transparent)]
    Transition(#[from] CoreError),
}

impl EngineError {
    /// Failure class reported in the session result.
    #[must_use]
    pub const fn failure_kind(&self, state: WorkflowState) -> FailureKind {
        match self {
            Self::Step { kind, .. } => *kind,
            Self::Cancelled => FailureKind::Cancelled,
            Self::Transition(_) => match state {
                WorkflowState::Exploring => FailureKind::DataSourceUnavailable,
                WorkflowState::Validating | WorkflowState::Escalating => {
                    FailureKind::LookupUnavailable
                }
                _ => FailureKind::ReasoningUnavailable,
            },
        }
    }
}
