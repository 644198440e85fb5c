//! JSONL audit trail envelope.
//!
//! Every committed workflow transition is recorded as a `TrailEvent` in a
//! per-session `{trail_dir}/{session_id}.jsonl` file, so a cancelled or failed
//! session can be diagnosed from disk.
//!
//! The `v` field supports schema versioning: trail lines without a `v` field
//! deserialize with `v == 1` via `#[serde(default)]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::WorkflowState;
use crate::ids::{HypothesisId, SessionId};

const fn default_trail_version() -> u32 {
    1
}

/// A single transition recorded in the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailEvent {
    /// Schema version. Defaults to 1 for trail lines without this field.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the transition.
    pub ts: String,

    pub session: SessionId,

    /// Monotonic sequence number within the session.
    pub seq: u64,

    pub from: WorkflowState,
    pub to: WorkflowState,

    pub iteration: u32,

    /// Hypothesis in flight when the transition happened.
    pub hypothesis: Option<HypothesisId>,

    /// Transition payload. Shape depends on `to`.
    pub data: serde_json::Value,
}

impl TrailEvent {
    #[must_use]
    pub fn now(
        session: &SessionId,
        seq: u64,
        from: WorkflowState,
        to: WorkflowState,
        iteration: u32,
        hypothesis: Option<HypothesisId>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            v: default_trail_version(),
            ts: chrono::Utc::now().to_rfc3339(),
            session: session.clone(),
            seq,
            from,
            to,
            iteration,
            hypothesis,
            data,
        }
    }
}
