use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::ExclusionSource;
use crate::ids::HypothesisId;

/// Normalized (target, drug) pair.
///
/// Targets compare case-insensitively as upper-case symbols; drug names compare
/// case-insensitively with internal whitespace collapsed, so `"Metformin "` and
/// `"metformin"` are the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct PairKey {
    pub target: String,
    pub drug: String,
}

impl PairKey {
    #[must_use]
    pub fn new(target: &str, drug: &str) -> Self {
        Self {
            target: target.trim().to_ascii_uppercase(),
            drug: drug
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.target, self.drug)
    }
}

/// A rejected (target, drug) pair the proponent must not propose again.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExclusionEntry {
    pub target_identifier: String,
    pub drug_identifier: String,
    pub rejection_reason: String,
    pub iteration_index: u32,
    pub source: ExclusionSource,
    /// Hypothesis whose rejection produced this entry.
    pub hypothesis: HypothesisId,
}

impl ExclusionEntry {
    #[must_use]
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.target_identifier, &self.drug_identifier)
    }
}
