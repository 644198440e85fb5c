//! Workflow states, verdicts, and provenance enums for RareAgent.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `WorkflowState` provides `allowed_next_states()` so the orchestrator can
//! refuse transitions the investigation graph does not contain.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// WorkflowState
// ---------------------------------------------------------------------------

/// Position of a session in the investigation graph.
///
/// ```text
/// exploring → proposing → critiquing → revising   → proposing
///                                    → rejected   → proposing
///                                    → escalating → validating → accepted
///                                                              → rejected → proposing
/// any non-terminal state → terminated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Exploring,
    Proposing,
    Critiquing,
    Revising,
    Escalating,
    Validating,
    Rejected,
    Accepted,
    Terminated,
}

impl WorkflowState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Exploring => &[Self::Proposing, Self::Terminated],
            // proposing → proposing is the advance to the next queued target
            Self::Proposing => &[Self::Critiquing, Self::Proposing, Self::Terminated],
            Self::Critiquing => &[
                Self::Revising,
                Self::Escalating,
                Self::Rejected,
                Self::Terminated,
            ],
            Self::Revising | Self::Rejected => &[Self::Proposing, Self::Terminated],
            Self::Escalating => &[Self::Validating, Self::Terminated],
            Self::Validating => &[Self::Accepted, Self::Rejected, Self::Terminated],
            Self::Accepted | Self::Terminated => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the session has stopped moving.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Terminated)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exploring => "exploring",
            Self::Proposing => "proposing",
            Self::Critiquing => "critiquing",
            Self::Revising => "revising",
            Self::Escalating => "escalating",
            Self::Validating => "validating",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CritiqueVerdict
// ---------------------------------------------------------------------------

/// Three-way outcome of an adversarial critique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CritiqueVerdict {
    Approve,
    Revise,
    Reject,
}

impl CritiqueVerdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Revise => "revise",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for CritiqueVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VerificationVerdict
// ---------------------------------------------------------------------------

/// Outcome of the deterministic registry cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationVerdict {
    Verified,
    Rejected,
}

impl VerificationVerdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExclusionSource
// ---------------------------------------------------------------------------

/// Which gate produced an exclusion entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionSource {
    /// A `rejected` verification record.
    Validator,
    /// A skeptic `reject` verdict (self-rejection, validator not consulted).
    Skeptic,
}

impl ExclusionSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validator => "validator",
            Self::Skeptic => "skeptic",
        }
    }
}

impl fmt::Display for ExclusionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TargetSource
// ---------------------------------------------------------------------------

/// Provenance of a target candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetSource {
    /// Supplied by the caller as a known-target hint.
    Hint,
    /// Reviewed UniProt entry annotated with the disease.
    Uniprot,
}

impl TargetSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::Uniprot => "uniprot",
        }
    }
}

impl fmt::Display for TargetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
