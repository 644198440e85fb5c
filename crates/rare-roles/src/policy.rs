//! Deterministic skeptic verdict policy.
//!
//! The language model scores objections; this policy alone turns the scores
//! into a verdict:
//! - `reject` if any contraindication is flagged and the overall confidence
//!   reaches `contraindication_confidence`
//! - `approve` if no objection's confidence-weighted severity exceeds
//!   `severity_threshold`
//! - `revise` otherwise

use rare_config::SkepticConfig;
use rare_core::entities::Critique;
use rare_core::enums::CritiqueVerdict;
use rare_core::errors::CoreError;
use rare_core::responses::{CritiqueResponse, ReasonAssessment};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkepticPolicy {
    pub severity_threshold: f64,
    pub contraindication_confidence: f64,
}

impl Default for SkepticPolicy {
    fn default() -> Self {
        Self::from(&SkepticConfig::default())
    }
}

impl From<&SkepticConfig> for SkepticPolicy {
    fn from(config: &SkepticConfig) -> Self {
        Self {
            severity_threshold: config.severity_threshold,
            contraindication_confidence: config.contraindication_confidence,
        }
    }
}

impl SkepticPolicy {
    #[must_use]
    pub fn verdict(&self, response: &CritiqueResponse) -> CritiqueVerdict {
        let confidence = response.confidence;
        let contraindicated = response.reasons.iter().any(|r| r.contraindication);
        if contraindicated && confidence >= self.contraindication_confidence {
            return CritiqueVerdict::Reject;
        }
        let blocking = response
            .reasons
            .iter()
            .any(|r| weighted(r, confidence) > self.severity_threshold);
        if blocking {
            CritiqueVerdict::Revise
        } else {
            CritiqueVerdict::Approve
        }
    }

    /// Apply the policy and order reasons from most to least severe.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the response confidence is outside `[0, 1]`.
    pub fn assess(&self, response: &CritiqueResponse) -> Result<Critique, CoreError> {
        let verdict = self.verdict(response);
        let mut reasons: Vec<&ReasonAssessment> = response.reasons.iter().collect();
        reasons.sort_by(|a, b| b.severity.total_cmp(&a.severity));
        Critique::new(
            verdict,
            reasons.into_iter().map(|r| r.text.clone()).collect(),
            response.confidence,
        )
    }
}

fn weighted(reason: &ReasonAssessment, confidence: f64) -> f64 {
    reason.severity * confidence
}
