//! Per-step timeout and bounded retry with exponential backoff.
//!
//! Every external call a workflow step makes goes through [`StepPolicy::run`]:
//!
//! - each attempt is bounded by the per-step timeout
//! - transient errors and timeouts are retried up to `max_retries` times
//! - delay is `initial * 2^step`, capped at `max`, with up to 25% down-jitter
//! - a server-requested `Retry-After` replaces the computed delay (still capped)
//!
//! Once retries run out the step escalates as [`EngineError::Step`] carrying
//! the error's [`FailureKind`].

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rare_config::SessionConfig;
use rare_core::errors::{FailureKind, Transient};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub struct StepPolicy {
    /// Bound on a single attempt.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Down-jitter factor (0.25 = up to 25% shorter delays).
    pub jitter_factor: f64,
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl StepPolicy {
    #[must_use]
    pub const fn from_config(config: &SessionConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.timeout_per_step_ms),
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.backoff_initial_ms),
            max_delay: Duration::from_millis(config.backoff_max_ms),
            jitter_factor: 0.25,
        }
    }

    /// Delay before retry number `backoff_step + 1`.
    #[must_use]
    pub fn backoff_delay(&self, backoff_step: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(delay) = retry_after {
            return delay.min(self.max_delay);
        }
        let exponent = i32::try_from(backoff_step).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * 2.0_f64.powi(exponent);
        let capped = base.min(self.max_delay.as_secs_f64());
        let jitter = 1.0 - rand::random::<f64>() * self.jitter_factor;
        Duration::from_secs_f64(capped * jitter)
    }

    /// Run one step's external call under this policy.
    ///
    /// `timeout_kind` is the failure class a timed-out attempt counts as.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Step`] on a non-transient error, or once every
    /// retry has failed transiently.
    pub async fn run<T, E, F, Fut>(
        &self,
        step: &'static str,
        timeout_kind: FailureKind,
        mut call: F,
    ) -> Result<T, EngineError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + Display,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let (kind, reason, retry_after, transient) =
                match tokio::time::timeout(self.timeout, call()).await {
                    Ok(Ok(value)) => {
                        if attempts > 1 {
                            tracing::debug!(step, attempts, "step recovered after retry");
                        }
                        return Ok(value);
                    }
                    Ok(Err(e)) => (
                        e.failure_kind(),
                        e.to_string(),
                        e.retry_after(),
                        e.is_transient(),
                    ),
                    Err(_) => (
                        timeout_kind,
                        format!("timed out after {}ms", self.timeout.as_millis()),
                        None,
                        true,
                    ),
                };

            if !transient || attempts > self.max_retries {
                return Err(EngineError::Step {
                    step,
                    kind,
                    attempts,
                    reason,
                });
            }

            let delay = self.backoff_delay(attempts - 1, retry_after);
            tracing::warn!(
                step,
                attempt = attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                %reason,
                "transient step failure, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
