//! Skeptic verdict policy thresholds.

use serde::{Deserialize, Serialize};

const fn default_severity_threshold() -> f64 {
    0.5
}

const fn default_contraindication_confidence() -> f64 {
    0.8
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SkepticConfig {
    /// Confidence-weighted severity above which a reason blocks approval.
    #[serde(default = "default_severity_threshold")]
    pub severity_threshold: f64,

    /// Confidence at or above which a flagged contraindication rejects outright.
    #[serde(default = "default_contraindication_confidence")]
    pub contraindication_confidence: f64,
}

impl Default for SkepticConfig {
    fn default() -> Self {
        Self {
            severity_threshold: default_severity_threshold(),
            contraindication_confidence: default_contraindication_confidence(),
        }
    }
}
