//! Terminal session results.
//!
//! A session always ends in exactly one `SessionResult`. Only `Accepted`
//! carries a final hypothesis, and it can only be built from a verified
//! record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{HistoryEntry, Hypothesis, VerificationRecord};
use crate::enums::WorkflowState;
use crate::errors::{CoreError, FailureKind};
use crate::ids::SessionId;

/// Diagnostic context for a session that stopped on an infrastructure fault.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FailureContext {
    pub kind: FailureKind,
    pub reason: String,
    /// Last state whose result was committed before the fault.
    pub last_state: WorkflowState,
    pub iteration_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionResult {
    Accepted {
        session_id: SessionId,
        hypothesis: Hypothesis,
        record: VerificationRecord,
        history: Vec<HistoryEntry>,
    },
    Exhausted {
        session_id: SessionId,
        history: Vec<HistoryEntry>,
    },
    LimitReached {
        session_id: SessionId,
        /// Best unresolved hypothesis. Advisory only, never verified.
        advisory: Option<Hypothesis>,
        history: Vec<HistoryEntry>,
    },
    InfrastructureFailure {
        session_id: SessionId,
        failure: FailureContext,
        history: Vec<HistoryEntry>,
    },
}

impl SessionResult {
    /// Build an `Accepted` result.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` unless `record` is verified.
    pub fn accepted(
        session_id: SessionId,
        hypothesis: Hypothesis,
        record: VerificationRecord,
        history: Vec<HistoryEntry>,
    ) -> Result<Self, CoreError> {
        if !record.is_verified() {
            return Err(CoreError::Validation(format!(
                "cannot accept {} without a verified record",
                hypothesis.id
            )));
        }
        Ok(Self::Accepted {
            session_id,
            hypothesis,
            record,
            history,
        })
    }

    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        match self {
            Self::Accepted { session_id, .. }
            | Self::Exhausted { session_id, .. }
            | Self::LimitReached { session_id, .. }
            | Self::InfrastructureFailure { session_id, .. } => session_id,
        }
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        match self {
            Self::Accepted { history, .. }
            | Self::Exhausted { history, .. }
            | Self::LimitReached { history, .. }
            | Self::InfrastructureFailure { history, .. } => history,
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Accepted { .. } => "accepted",
            Self::Exhausted { .. } => "exhausted",
            Self::LimitReached { .. } => "limit_reached",
            Self::InfrastructureFailure { .. } => "infrastructure_failure",
        }
    }

    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
