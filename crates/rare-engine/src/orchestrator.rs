//! The investigation state machine.
//!
//! ```text
//! exploring → proposing → critiquing → revising   → proposing
//!                                    → rejected   → proposing      (skeptic reject)
//!                                    → escalating → validating → accepted
//!                                                              → rejected → proposing
//! ```
//!
//! One hypothesis is in flight at a time and every step's result is committed
//! to [`SessionState`] before the next step starts. Each committed transition
//! is logged at debug level and appended to the audit trail.

use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;
use rare_config::{ConfigError, SessionConfig};
use rare_core::entities::{Critique, DiseaseQuery, Hypothesis};
use rare_core::enums::{CritiqueVerdict, ExclusionSource, WorkflowState};
use rare_core::errors::{FailureKind, Transient};
use rare_core::result::{FailureContext, SessionResult};
use rare_core::trail::TrailEvent;
use rare_registry::ReferenceVerifier;
use rare_roles::{Proponent, Skeptic, TargetExplorer};
use serde_json::{Value, json};

use crate::cancel::CancelHandle;
use crate::error::EngineError;
use crate::retry::StepPolicy;
use crate::state::SessionState;
use crate::trail::TrailWriter;
use crate::validator::DeterministicValidator;

/// Drives sessions through the explorer, proponent, skeptic and validator.
///
/// Holds no per-session state, so one orchestrator can run any number of
/// sessions concurrently.
pub struct Orchestrator<E, P, S, V> {
    explorer: E,
    proponent: P,
    skeptic: S,
    validator: DeterministicValidator<V>,
    config: SessionConfig,
    policy: StepPolicy,
    trail: TrailWriter,
}

/// What the session loop decided to do after a step.
enum Next {
    Propose,
    Finish(SessionResult),
}

impl<E, P, S, V> Orchestrator<E, P, S, V>
where
    E: TargetExplorer,
    P: Proponent,
    S: Skeptic,
    V: ReferenceVerifier,
{
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `config` fails validation.
    pub fn new(
        explorer: E,
        proponent: P,
        skeptic: S,
        verifier: V,
        config: SessionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            explorer,
            proponent,
            skeptic,
            validator: DeterministicValidator::new(verifier),
            policy: StepPolicy::from_config(&config),
            config,
            trail: TrailWriter::disabled(),
        })
    }

    #[must_use]
    pub fn with_trail(mut self, trail: TrailWriter) -> Self {
        self.trail = trail;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: StepPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub const fn explorer(&self) -> &E {
        &self.explorer
    }

    pub const fn proponent(&self) -> &P {
        &self.proponent
    }

    pub const fn skeptic(&self) -> &S {
        &self.skeptic
    }

    pub const fn validator(&self) -> &DeterministicValidator<V> {
        &self.validator
    }

    /// Run one investigation to its terminal result.
    pub async fn start_session(&self, query: DiseaseQuery) -> SessionResult {
        self.start_session_with_cancel(query, &CancelHandle::new())
            .await
    }

    /// Run independent investigations concurrently. Results keep input order.
    pub async fn start_sessions(&self, queries: Vec<DiseaseQuery>) -> Vec<SessionResult> {
        self.start_sessions_with_cancel(queries, &CancelHandle::new())
            .await
    }

    /// Like [`Self::start_sessions`], with one handle cancelling every session.
    pub async fn start_sessions_with_cancel(
        &self,
        queries: Vec<DiseaseQuery>,
        cancel: &CancelHandle,
    ) -> Vec<SessionResult> {
        join_all(
            queries
                .into_iter()
                .map(|query| self.start_session_with_cancel(query, cancel)),
        )
        .await
    }

    /// Run one investigation that stops early once `cancel` fires.
    pub async fn start_session_with_cancel(
        &self,
        query: DiseaseQuery,
        cancel: &CancelHandle,
    ) -> SessionResult {
        self.run(SessionState::new(query), cancel).await
    }

    /// Run a session from an already-built state.
    pub async fn run(&self, mut state: SessionState, cancel: &CancelHandle) -> SessionResult {
        tracing::debug!(session = %state.id(), disease = %state.query().name, "session started");
        let result = match self.drive(&mut state, cancel).await {
            Ok(result) => result,
            Err(err) => self.fail(state, &err).await,
        };
        tracing::info!(
            session = %result.session_id(),
            outcome = result.outcome(),
            hypotheses = result.history().len(),
            "session finished"
        );
        result
    }

    async fn drive(
        &self,
        state: &mut SessionState,
        cancel: &CancelHandle,
    ) -> Result<SessionResult, EngineError> {
        let query = state.query().clone();
        let exploration = self
            .step(cancel, "explore", FailureKind::DataSourceUnavailable, || {
                self.explorer.explore(&query)
            })
            .await?;

        if exploration.candidates.is_empty() {
            tracing::debug!(session = %state.id(), "explorer found no targets");
            return Ok(self.exhausted(state, "no candidate targets").await);
        }

        let targets: Vec<&str> = exploration
            .candidates
            .iter()
            .map(|c| c.identifier.as_str())
            .collect();
        let data = json!({
            "targets": targets,
            "literature": exploration.literature.as_ref().map(|l| l.total_count),
        });
        state.load_targets(exploration.candidates);
        self.transition(state, WorkflowState::Proposing, data).await?;

        loop {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            match self.iterate(state, cancel).await? {
                Next::Propose => {}
                Next::Finish(result) => return Ok(result),
            }
        }
    }

    /// One pass from `proposing` back to `proposing`, or to a terminal result.
    async fn iterate(
        &self,
        state: &mut SessionState,
        cancel: &CancelHandle,
    ) -> Result<Next, EngineError> {
        if state.iteration_count() >= self.config.max_iterations {
            return Ok(Next::Finish(self.limit_reached(state).await));
        }

        if state.repeats_on_target() >= self.config.max_proposal_attempts {
            let left = state.target().map(|t| t.identifier.clone());
            if !state.advance_target() {
                return Ok(Next::Finish(self.exhausted(state, "target queue exhausted").await));
            }
            let data = json!({ "left": left, "target": state.target().map(|t| &t.identifier) });
            self.transition(state, WorkflowState::Proposing, data).await?;
            return Ok(Next::Propose);
        }

        let id = state.begin_proposal();
        let Some(ctx) = state.proposal_context(id) else {
            return Ok(Next::Finish(self.exhausted(state, "target queue exhausted").await));
        };
        let hypothesis = self
            .step(cancel, "propose", FailureKind::ReasoningUnavailable, || {
                self.proponent.propose(&ctx)
            })
            .await?;

        if state.exclusions().contains(&hypothesis.pair_key()) {
            tracing::warn!(
                session = %state.id(),
                pair = %hypothesis.pair_key(),
                "proponent repeated an excluded pair, discarding"
            );
            state.record_repeat();
            return Ok(Next::Propose);
        }

        let data = json!({
            "drug": hypothesis.drug_name,
            "target": hypothesis.target.identifier,
            "parent": hypothesis.parent,
        });
        state.commit_proposal(hypothesis.clone());
        self.transition(state, WorkflowState::Critiquing, data).await?;

        let critique = self
            .step(cancel, "critique", FailureKind::ReasoningUnavailable, || {
                self.skeptic.critique(&state.query().name, &hypothesis)
            })
            .await?;
        let verdict = self.consensus(&critique);
        state.commit_critique(critique.clone());

        match verdict {
            CritiqueVerdict::Approve => self.escalate(state, cancel, &hypothesis).await,
            CritiqueVerdict::Reject => {
                let reason = critique.joined_reasons();
                self.exclude(state, ExclusionSource::Skeptic, &reason).await?;
                Ok(Next::Propose)
            }
            CritiqueVerdict::Revise => {
                let mut feedback = critique.reasons.clone();
                if critique.verdict == CritiqueVerdict::Approve {
                    feedback.push(format!(
                        "approval confidence {:.2} is below the consensus threshold {:.2}",
                        critique.confidence, self.config.consensus_threshold
                    ));
                }
                let data = json!({ "reasons": feedback, "confidence": critique.confidence });
                state.request_revision(feedback);
                self.transition(state, WorkflowState::Revising, data).await?;
                self.transition(state, WorkflowState::Proposing, Value::Null).await?;
                Ok(Next::Propose)
            }
        }
    }

    async fn escalate(
        &self,
        state: &mut SessionState,
        cancel: &CancelHandle,
        hypothesis: &Hypothesis,
    ) -> Result<Next, EngineError> {
        self.transition(state, WorkflowState::Escalating, Value::Null).await?;
        self.transition(state, WorkflowState::Validating, Value::Null).await?;

        let record = self
            .step(cancel, "validate", FailureKind::LookupUnavailable, || {
                self.validator.validate(hypothesis)
            })
            .await?;
        state.commit_verification(record.clone());

        if record.is_verified() {
            let data = json!({
                "compound_id": record.compound_id,
                "target_id": record.target_id,
            });
            self.transition(state, WorkflowState::Accepted, data).await?;
            let result = SessionResult::accepted(
                state.id().clone(),
                hypothesis.clone(),
                record,
                state.history().to_vec(),
            )?;
            return Ok(Next::Finish(result));
        }

        let reason = record
            .rejection_reason
            .as_deref()
            .unwrap_or("rejected by validator");
        self.exclude(state, ExclusionSource::Validator, reason).await?;
        Ok(Next::Propose)
    }

    /// Approve below the consensus threshold counts as revise.
    fn consensus(&self, critique: &Critique) -> CritiqueVerdict {
        match critique.verdict {
            CritiqueVerdict::Approve
                if critique.confidence < self.config.consensus_threshold =>
            {
                CritiqueVerdict::Revise
            }
            verdict => verdict,
        }
    }

    async fn exclude(
        &self,
        state: &mut SessionState,
        source: ExclusionSource,
        reason: &str,
    ) -> Result<(), EngineError> {
        if state.exclude_current(source, reason) == Some(false) {
            tracing::warn!(
                session = %state.id(),
                reason,
                "pair already excluded, keeping the first rejection"
            );
        }
        let data = json!({ "source": source, "reason": reason });
        self.transition(state, WorkflowState::Rejected, data).await?;
        self.transition(state, WorkflowState::Proposing, Value::Null).await?;
        Ok(())
    }

    /// Run one external call under the step policy, racing cancellation.
    async fn step<T, Er, F, Fut>(
        &self,
        cancel: &CancelHandle,
        name: &'static str,
        timeout_kind: FailureKind,
        call: F,
    ) -> Result<T, EngineError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Er>>,
        Er: Transient + Display,
    {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(EngineError::Cancelled),
            result = self.policy.run(name, timeout_kind, call) => result,
        }
    }

    async fn transition(
        &self,
        state: &mut SessionState,
        to: WorkflowState,
        data: Value,
    ) -> Result<(), EngineError> {
        let from = state.transition(to)?;
        tracing::debug!(
            session = %state.id(),
            %from,
            %to,
            iteration = state.iteration_count(),
            "transition"
        );
        self.record(state, from, to, data).await;
        Ok(())
    }

    async fn record(
        &self,
        state: &mut SessionState,
        from: WorkflowState,
        to: WorkflowState,
        data: Value,
    ) {
        let seq = state.next_trail_seq();
        let hypothesis = state.current_hypothesis().map(|h| h.id);
        let event = TrailEvent::now(
            state.id(),
            seq,
            from,
            to,
            state.iteration_count(),
            hypothesis,
            data,
        );
        if let Err(e) = self.trail.write(event).await {
            tracing::warn!(session = %state.id(), error = %e, "failed to append trail event");
        }
    }

    async fn terminate(&self, state: &mut SessionState, data: Value) {
        match state.transition(WorkflowState::Terminated) {
            Ok(from) => self.record(state, from, WorkflowState::Terminated, data).await,
            Err(e) => tracing::warn!(session = %state.id(), error = %e, "terminate refused"),
        }
    }

    async fn exhausted(&self, state: &mut SessionState, reason: &str) -> SessionResult {
        self.terminate(state, json!({ "outcome": "exhausted", "reason": reason }))
            .await;
        SessionResult::Exhausted {
            session_id: state.id().clone(),
            history: state.history().to_vec(),
        }
    }

    async fn limit_reached(&self, state: &mut SessionState) -> SessionResult {
        let advisory = state.advisory();
        self.terminate(
            state,
            json!({
                "outcome": "limit_reached",
                "kind": FailureKind::IterationLimitExceeded,
                "advisory": advisory.as_ref().map(|h| h.id),
            }),
        )
        .await;
        SessionResult::LimitReached {
            session_id: state.id().clone(),
            advisory,
            history: state.history().to_vec(),
        }
    }

    async fn fail(&self, mut state: SessionState, err: &EngineError) -> SessionResult {
        let last_state = state.workflow();
        let failure = FailureContext {
            kind: err.failure_kind(last_state),
            reason: err.to_string(),
            last_state,
            iteration_count: state.iteration_count(),
        };
        tracing::warn!(
            session = %state.id(),
            kind = %failure.kind,
            reason = %failure.reason,
            state = %last_state,
            "session stopped on infrastructure failure"
        );
        if !last_state.is_terminal() {
            let data = json!({ "outcome": "infrastructure_failure", "failure": &failure });
            self.terminate(&mut state, data).await;
        }
        SessionResult::InfrastructureFailure {
            session_id: state.id().clone(),
            failure,
            history: state.into_history(),
        }
    }
}
