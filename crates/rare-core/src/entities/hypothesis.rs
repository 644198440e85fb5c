use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::exclusion::PairKey;
use super::target::TargetCandidate;
use crate::ids::HypothesisId;

/// A candidate (drug, target, mechanism) triple under evaluation.
///
/// Never mutated in place: a revision is a new `Hypothesis` whose `parent`
/// names the one it revises.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Hypothesis {
    pub id: HypothesisId,
    pub parent: Option<HypothesisId>,
    pub drug_name: String,
    /// Registry identifier the proponent believes the drug has (e.g. `CID 2244`).
    pub drug_identifier_hint: Option<String>,
    pub target: TargetCandidate,
    pub proposed_mechanism: String,
    pub rationale: String,
    pub iteration_index: u32,
}

impl Hypothesis {
    /// The (target, drug) pair used for exclusion checks.
    #[must_use]
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.target.identifier, &self.drug_name)
    }
}
