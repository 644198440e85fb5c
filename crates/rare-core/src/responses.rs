//! Payloads exchanged with the reasoning roles and the explorer.
//!
//! `ProposalResponse` and `CritiqueResponse` are the strict shapes that
//! language-model output must satisfy; `rare-schema` validates raw JSON against
//! their generated schemas before deserializing. `Exploration` is what the
//! explorer hands to the orchestrator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::TargetCandidate;

/// Proponent output for a single hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProposalResponse {
    /// Name of an existing approved drug.
    #[schemars(length(min = 1), regex(pattern = r"\S"))]
    pub drug_name: String,
    /// Registry identifier for the drug, if known (e.g. `CID 2244`).
    #[serde(default)]
    pub drug_identifier_hint: Option<String>,
    /// Mechanism of action (inhibitor, agonist, chaperone, ...).
    #[schemars(length(min = 1), regex(pattern = r"\S"))]
    pub mechanism: String,
    #[serde(default)]
    pub rationale: String,
}

/// A single scored objection raised by the skeptic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReasonAssessment {
    #[schemars(length(min = 1))]
    pub text: String,
    /// Severity in `[0, 1]`.
    #[schemars(range(min = 0.0, max = 1.0))]
    pub severity: f64,
    /// Flags a known contraindication class (e.g. confirmed antagonistic pathway).
    #[serde(default)]
    pub contraindication: bool,
}

/// Skeptic output before the verdict policy is applied.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CritiqueResponse {
    #[serde(default)]
    pub reasons: Vec<ReasonAssessment>,
    /// Overall confidence in `[0, 1]`.
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence: f64,
}

/// Literature context gathered alongside the target list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LiteratureEvidence {
    pub source: String,
    pub query: String,
    pub total_count: u64,
    /// Top article identifiers (PMIDs for PubMed).
    pub ids: Vec<String>,
}

/// Explorer result: prioritized targets plus supporting literature.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Exploration {
    pub candidates: Vec<TargetCandidate>,
    #[serde(default)]
    pub literature: Option<LiteratureEvidence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_hint_defaults_to_none() {
        let json = r#"{"drug_name":"Ambroxol","mechanism":"Chaperone"}"#;
        let proposal: ProposalResponse = serde_json::from_str(json).unwrap();
        assert_eq!(proposal.drug_name, "Ambroxol");
        assert!(proposal.drug_identifier_hint.is_none());
        assert!(proposal.rationale.is_empty());
    }

    #[test]
    fn critique_reasons_default_empty() {
        let json = r#"{"confidence":0.8}"#;
        let critique: CritiqueResponse = serde_json::from_str(json).unwrap();
        assert!(critique.reasons.is_empty());
    }
}
