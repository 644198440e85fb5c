//! # rare-roles
//!
//! The three non-deterministic roles of an investigation and their production
//! implementations:
//! - [`TargetExplorer`]: disease → prioritized, shuffled target candidates
//!   ([`explorer::RegistryExplorer`], backed by UniProt and PubMed)
//! - [`Proponent`]: target + exclusions + feedback → one hypothesis
//!   ([`proponent::LlmProponent`])
//! - [`Skeptic`]: hypothesis → three-way critique
//!   ([`skeptic::LlmSkeptic`], verdict decided by [`policy::SkepticPolicy`])
//!
//! Roles never see the session state. The orchestrator passes each call
//! exactly the values it needs and commits whatever comes back.

pub mod explorer;
pub mod llm;
pub mod policy;
pub mod prompt;
pub mod proponent;
pub mod skeptic;

mod error;

pub use error::RoleError;

use std::future::Future;

use rare_core::entities::{
    Critique, DiseaseQuery, ExclusionEntry, HistoryEntry, Hypothesis, PairKey, TargetCandidate,
};
use rare_core::ids::HypothesisId;
use rare_core::responses::{Exploration, ProposalResponse};

/// Produces the candidate target list for a disease.
pub trait TargetExplorer: Send + Sync {
    /// Non-empty on success unless no source knows the disease. Ordered by
    /// priority, randomized among equal priorities.
    fn explore(
        &self,
        query: &DiseaseQuery,
    ) -> impl Future<Output = Result<Exploration, RoleError>> + Send;
}

/// Generates one hypothesis for a target.
pub trait Proponent: Send + Sync {
    /// Must not return a pair listed in `ctx.exclusions`; the orchestrator
    /// discards any that slip through.
    fn propose(
        &self,
        ctx: &ProposalContext<'_>,
    ) -> impl Future<Output = Result<Hypothesis, RoleError>> + Send;
}

/// Critiques one hypothesis.
pub trait Skeptic: Send + Sync {
    fn critique(
        &self,
        disease: &str,
        hypothesis: &Hypothesis,
    ) -> impl Future<Output = Result<Critique, RoleError>> + Send;
}

/// Everything a proponent may look at for one proposal.
#[derive(Debug, Clone, Copy)]
pub struct ProposalContext<'a> {
    pub disease: &'a str,
    /// Id the new hypothesis must carry.
    pub id: HypothesisId,
    pub iteration_index: u32,
    /// The hypothesis being revised, if this proposal answers a critique.
    pub parent: Option<&'a Hypothesis>,
    pub target: &'a TargetCandidate,
    pub exclusions: &'a [ExclusionEntry],
    /// Critique reasons the new hypothesis has to address.
    pub feedback: &'a [String],
    /// Every hypothesis proposed earlier in the session.
    pub history: &'a [HistoryEntry],
}

impl ProposalContext<'_> {
    /// Whether proposing `drug` for this context's target would repeat an excluded pair.
    #[must_use]
    pub fn is_excluded(&self, drug: &str) -> bool {
        let key = PairKey::new(&self.target.identifier, drug);
        self.exclusions.iter().any(|e| e.pair_key() == key)
    }

    /// Exclusions recorded against this context's target.
    pub fn target_exclusions(&self) -> impl Iterator<Item = &ExclusionEntry> {
        self.exclusions
            .iter()
            .filter(|e| e.target_identifier.eq_ignore_ascii_case(&self.target.identifier))
    }

    /// Distinct drugs proposed earlier in the session, first proposal first.
    #[must_use]
    pub fn tried_drugs(&self) -> Vec<&str> {
        let mut drugs: Vec<&str> = Vec::new();
        for entry in self.history {
            let name = entry.hypothesis.drug_name.as_str();
            if !drugs.iter().any(|d| d.eq_ignore_ascii_case(name)) {
                drugs.push(name);
            }
        }
        drugs
    }

    /// Build the hypothesis value for a parsed proposal.
    #[must_use]
    pub fn hypothesis(&self, response: ProposalResponse) -> Hypothesis {
        Hypothesis {
            id: self.id,
            parent: self.parent.map(|p| p.id),
            drug_name: response.drug_name.trim().to_string(),
            drug_identifier_hint: response
                .drug_identifier_hint
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            target: self.target.clone(),
            proposed_mechanism: response.mechanism.trim().to_string(),
            rationale: response.rationale,
            iteration_index: self.iteration_index,
        }
    }
}
