use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CritiqueVerdict;
use crate::errors::CoreError;

/// Structured adversarial critique of one hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Critique {
    pub verdict: CritiqueVerdict,
    /// Ordered reasons, most severe first.
    pub reasons: Vec<String>,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Critique {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `confidence` is not a finite value in `[0, 1]`.
    pub fn new(
        verdict: CritiqueVerdict,
        reasons: Vec<String>,
        confidence: f64,
    ) -> Result<Self, CoreError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(CoreError::Validation(format!(
                "critique confidence must be within [0, 1], got {confidence}"
            )));
        }
        Ok(Self {
            verdict,
            reasons,
            confidence,
        })
    }

    /// Reasons joined into a single exclusion/feedback string.
    #[must_use]
    pub fn joined_reasons(&self) -> String {
        if self.reasons.is_empty() {
            return format!("skeptic verdict: {}", self.verdict);
        }
        self.reasons.join("; ")
    }
}
