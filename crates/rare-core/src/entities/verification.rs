use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::VerificationVerdict;

pub const REASON_COMPOUND_UNRESOLVED: &str = "compound unresolved";
pub const REASON_TARGET_UNRESOLVED: &str = "target unresolved";
pub const REASON_NO_INTERACTION_EVIDENCE: &str = "no structural or curated interaction evidence";

/// Canonical compound identifier (PubChem CID).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct CompoundId(pub u64);

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CID {}", self.0)
    }
}

/// Canonical curated protein-target identifier (UniProtKB accession).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct TargetId {
    pub accession: String,
    /// Primary gene symbol recorded by the registry.
    pub gene_symbol: Option<String>,
}

impl TargetId {
    #[must_use]
    pub fn new(accession: impl Into<String>, gene_symbol: Option<String>) -> Self {
        Self {
            accession: accession.into(),
            gene_symbol,
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniProt {}", self.accession)
    }
}

/// Machine-checkable outcome of the deterministic validator.
///
/// Produced exactly once per hypothesis that reaches validation. This is the
/// only value that can authorize acceptance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct VerificationRecord {
    pub compound_id: Option<CompoundId>,
    pub target_id: Option<TargetId>,
    pub structural_evidence: bool,
    pub verdict: VerificationVerdict,
    pub rejection_reason: Option<String>,
}

impl VerificationRecord {
    #[must_use]
    pub const fn verified(compound_id: CompoundId, target_id: TargetId) -> Self {
        Self {
            compound_id: Some(compound_id),
            target_id: Some(target_id),
            structural_evidence: true,
            verdict: VerificationVerdict::Verified,
            rejection_reason: None,
        }
    }

    #[must_use]
    pub fn rejected(
        compound_id: Option<CompoundId>,
        target_id: Option<TargetId>,
        reason: &str,
    ) -> Self {
        Self {
            compound_id,
            target_id,
            structural_evidence: false,
            verdict: VerificationVerdict::Rejected,
            rejection_reason: Some(reason.to_string()),
        }
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verdict == VerificationVerdict::Verified
    }
}
