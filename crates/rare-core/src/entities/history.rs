use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::critique::Critique;
use super::hypothesis::Hypothesis;
use super::verification::VerificationRecord;

/// One hypothesis and whatever the gates said about it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HistoryEntry {
    pub hypothesis: Hypothesis,
    pub critique: Option<Critique>,
    pub verification: Option<VerificationRecord>,
}

impl HistoryEntry {
    #[must_use]
    pub const fn proposed(hypothesis: Hypothesis) -> Self {
        Self {
            hypothesis,
            critique: None,
            verification: None,
        }
    }
}
