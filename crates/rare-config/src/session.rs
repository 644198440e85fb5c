//! Orchestrator session limits, retry policy, and audit trail location.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_max_iterations() -> u32 {
    10
}

const fn default_consensus_threshold() -> f64 {
    0.7
}

const fn default_timeout_per_step_ms() -> u64 {
    30_000
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_max_proposal_attempts() -> u32 {
    3
}

const fn default_backoff_initial_ms() -> u64 {
    500
}

const fn default_backoff_max_ms() -> u64 {
    8_000
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionConfig {
    /// Ceiling on proposals per session. Guarantees termination.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Minimum skeptic confidence for an `approve` to count as consensus.
    #[serde(default = "default_consensus_threshold")]
    pub consensus_threshold: f64,

    /// Timeout applied to every external call made by a workflow step.
    #[serde(default = "default_timeout_per_step_ms")]
    pub timeout_per_step_ms: u64,

    /// Retries per step after the first attempt, for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Consecutive proposals on one target that repeat an excluded pair
    /// before the orchestrator moves to the next target.
    #[serde(default = "default_max_proposal_attempts")]
    pub max_proposal_attempts: u32,

    /// First backoff delay; doubles per retry.
    #[serde(default = "default_backoff_initial_ms")]
    pub backoff_initial_ms: u64,

    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,

    /// Directory for per-session JSONL audit trails. Empty disables the trail.
    #[serde(default)]
    pub trail_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            consensus_threshold: default_consensus_threshold(),
            timeout_per_step_ms: default_timeout_per_step_ms(),
            max_retries: default_max_retries(),
            max_proposal_attempts: default_max_proposal_attempts(),
            backoff_initial_ms: default_backoff_initial_ms(),
            backoff_max_ms: default_backoff_max_ms(),
            trail_dir: String::new(),
        }
    }
}

impl SessionConfig {
    /// Whether an audit trail directory is configured.
    #[must_use]
    pub fn has_trail(&self) -> bool {
        !self.trail_dir.trim().is_empty()
    }

    /// Reject values that would make a session unbounded or meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(invalid("session.max_iterations", "must be at least 1"));
        }
        if !self.consensus_threshold.is_finite() || !(0.0..=1.0).contains(&self.consensus_threshold)
        {
            return Err(invalid(
                "session.consensus_threshold",
                "must be within [0, 1]",
            ));
        }
        if self.timeout_per_step_ms == 0 {
            return Err(invalid("session.timeout_per_step_ms", "must be positive"));
        }
        if self.max_proposal_attempts == 0 {
            return Err(invalid("session.max_proposal_attempts", "must be at least 1"));
        }
        if self.backoff_max_ms < self.backoff_initial_ms {
            return Err(invalid(
                "session.backoff_max_ms",
                "must not be smaller than backoff_initial_ms",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.max_retries, 3);
        assert!(!config.has_trail());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_iterations_rejected() {
        let config = SessionConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "session.max_iterations"
        ));
    }

    #[test]
    fn threshold_outside_unit_interval_rejected() {
        for threshold in [-0.1, 1.01, f64::NAN] {
            let config = SessionConfig {
                consensus_threshold: threshold,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{threshold} should be rejected");
        }
    }

    #[test]
    fn inverted_backoff_rejected() {
        let config = SessionConfig {
            backoff_initial_ms: 1_000,
            backoff_max_ms: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
