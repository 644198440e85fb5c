//! Session and hypothesis identifiers.
//!
//! Session ids are `ses-` followed by 8 lowercase hex characters. Hypothesis
//! ids are sequential within a session and render as `hyp-0001`; the session
//! owns the sequence, so hypotheses reference their parent by id instead of by
//! pointer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SESSION_PREFIX: &str = "ses";
pub const HYPOTHESIS_PREFIX: &str = "hyp";

/// Identifier of one disease-investigation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session id.
    ///
    /// Falls back to the clock's sub-second nanoseconds if the OS random
    /// source is unavailable.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 4];
        if getrandom::fill(&mut bytes).is_err() {
            bytes = chrono::Utc::now().timestamp_subsec_nanos().to_le_bytes();
        }
        Self(format!(
            "{SESSION_PREFIX}-{:02x}{:02x}{:02x}{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3]
        ))
    }

    /// Wrap an existing id (e.g. one read back from an audit trail).
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequential identifier of a hypothesis within its session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct HypothesisId(u32);

impl HypothesisId {
    #[must_use]
    pub const fn new(seq: u32) -> Self {
        Self(seq)
    }

    #[must_use]
    pub const fn seq(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HYPOTHESIS_PREFIX}-{:04}", self.0)
    }
}
