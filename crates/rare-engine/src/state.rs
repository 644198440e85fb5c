//! Session state: the single mutable aggregate of an investigation.
//!
//! Owned exclusively by the orchestrator. Roles receive borrowed views built
//! from it ([`SessionState::proposal_context`]) and return new values that
//! the orchestrator commits here. The hypothesis in flight and the parent of a
//! revision are indices into `history`, never references.

use std::collections::VecDeque;

use rare_core::entities::{
    Critique, DiseaseQuery, ExclusionEntry, HistoryEntry, Hypothesis, TargetCandidate,
    VerificationRecord,
};
use rare_core::enums::{CritiqueVerdict, ExclusionSource, WorkflowState};
use rare_core::errors::CoreError;
use rare_core::ids::{HypothesisId, SessionId};
use rare_roles::ProposalContext;

use crate::exclusion::ExclusionMemory;

#[derive(Debug)]
pub struct SessionState {
    id: SessionId,
    query: DiseaseQuery,
    workflow: WorkflowState,
    targets: VecDeque<TargetCandidate>,
    target: Option<TargetCandidate>,
    repeats_on_target: u32,
    exclusions: ExclusionMemory,
    iteration_count: u32,
    next_hypothesis: HypothesisId,
    current: Option<usize>,
    parent: Option<usize>,
    feedback: Vec<String>,
    history: Vec<HistoryEntry>,
    trail_seq: u64,
}

impl SessionState {
    #[must_use]
    pub fn new(query: DiseaseQuery) -> Self {
        Self::with_id(SessionId::generate(), query)
    }

    #[must_use]
    pub fn with_id(id: SessionId, query: DiseaseQuery) -> Self {
        Self {
            id,
            query,
            workflow: WorkflowState::Exploring,
            targets: VecDeque::new(),
            target: None,
            repeats_on_target: 0,
            exclusions: ExclusionMemory::new(),
            iteration_count: 0,
            next_hypothesis: HypothesisId::new(1),
            current: None,
            parent: None,
            feedback: Vec::new(),
            history: Vec::new(),
            trail_seq: 0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub const fn query(&self) -> &DiseaseQuery {
        &self.query
    }

    #[must_use]
    pub const fn workflow(&self) -> WorkflowState {
        self.workflow
    }

    #[must_use]
    pub const fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    /// Consecutive proposals on the current target that repeated an excluded pair.
    #[must_use]
    pub const fn repeats_on_target(&self) -> u32 {
        self.repeats_on_target
    }

    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionMemory {
        &self.exclusions
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    #[must_use]
    pub const fn target(&self) -> Option<&TargetCandidate> {
        self.target.as_ref()
    }

    /// Targets still waiting behind the current one.
    #[must_use]
    pub fn queued_targets(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn current_hypothesis(&self) -> Option<&Hypothesis> {
        self.current.map(|i| &self.history[i].hypothesis)
    }

    /// Move to `to`, refusing edges the workflow graph does not contain.
    ///
    /// Returns the state that was left.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] for a disallowed edge.
    pub fn transition(&mut self, to: WorkflowState) -> Result<WorkflowState, CoreError> {
        let from = self.workflow;
        if !from.can_transition_to(to) {
            return Err(CoreError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.workflow = to;
        Ok(from)
    }

    /// Sequence number for the next trail event.
    pub const fn next_trail_seq(&mut self) -> u64 {
        let seq = self.trail_seq;
        self.trail_seq += 1;
        seq
    }

    /// Queue the explorer's candidates and select the first one.
    pub fn load_targets(&mut self, candidates: Vec<TargetCandidate>) {
        self.targets = candidates.into();
        self.target = self.targets.pop_front();
        self.repeats_on_target = 0;
    }

    /// Select the next queued target. Returns `false` when the queue is empty.
    ///
    /// Feedback and the revision parent belong to the old target and are dropped.
    pub fn advance_target(&mut self) -> bool {
        self.target = self.targets.pop_front();
        self.repeats_on_target = 0;
        self.parent = None;
        self.feedback.clear();
        self.target.is_some()
    }

    /// Count one proposal and reserve the id of its hypothesis.
    pub const fn begin_proposal(&mut self) -> HypothesisId {
        self.iteration_count += 1;
        let id = self.next_hypothesis;
        self.next_hypothesis = id.next();
        id
    }

    /// Read-only view handed to the proponent for the reserved `id`.
    #[must_use]
    pub fn proposal_context(&self, id: HypothesisId) -> Option<ProposalContext<'_>> {
        let target = self.target.as_ref()?;
        Some(ProposalContext {
            disease: &self.query.name,
            id,
            iteration_index: self.iteration_count,
            parent: self.parent.map(|i| &self.history[i].hypothesis),
            target,
            exclusions: self.exclusions.entries(),
            feedback: &self.feedback,
            history: &self.history,
        })
    }

    /// The proponent returned an excluded pair; its proposal was discarded.
    pub const fn record_repeat(&mut self) {
        self.repeats_on_target += 1;
    }

    /// Make `hypothesis` the one in flight. Consumes pending feedback and
    /// clears the repeat count.
    pub fn commit_proposal(&mut self, hypothesis: Hypothesis) {
        self.history.push(HistoryEntry::proposed(hypothesis));
        self.current = Some(self.history.len() - 1);
        self.repeats_on_target = 0;
        self.parent = None;
        self.feedback.clear();
    }

    pub fn commit_critique(&mut self, critique: Critique) {
        if let Some(i) = self.current {
            self.history[i].critique = Some(critique);
        }
    }

    pub fn commit_verification(&mut self, record: VerificationRecord) {
        if let Some(i) = self.current {
            self.history[i].verification = Some(record);
        }
    }

    /// The next proposal revises the current hypothesis and must address `feedback`.
    pub fn request_revision(&mut self, feedback: Vec<String>) {
        self.parent = self.current;
        self.feedback = feedback;
    }

    /// Exclude the current hypothesis's pair.
    ///
    /// The reason also becomes feedback for the next proposal. Returns `None`
    /// when no hypothesis is in flight, `Some(false)` when the pair was
    /// already excluded.
    pub fn exclude_current(&mut self, source: ExclusionSource, reason: &str) -> Option<bool> {
        let hypothesis = self.current_hypothesis()?;
        let entry = ExclusionEntry {
            target_identifier: hypothesis.target.identifier.clone(),
            drug_identifier: hypothesis.drug_name.clone(),
            rejection_reason: reason.to_string(),
            iteration_index: hypothesis.iteration_index,
            source,
            hypothesis: hypothesis.id,
        };
        self.feedback = vec![format!(
            "{} for {} was rejected: {reason}",
            entry.drug_identifier, entry.target_identifier
        )];
        self.parent = None;
        Some(self.exclusions.record(entry))
    }

    /// Best unresolved hypothesis: never verified or excluded, not rejected
    /// by the skeptic, highest critique confidence (latest wins ties).
    #[must_use]
    pub fn advisory(&self) -> Option<Hypothesis> {
        self.history
            .iter()
            .filter(|entry| entry.verification.is_none())
            .filter(|entry| !self.exclusions.contains(&entry.hypothesis.pair_key()))
            .filter_map(|entry| {
                let critique = entry.critique.as_ref()?;
                (critique.verdict != CritiqueVerdict::Reject)
                    .then_some((critique.confidence, &entry.hypothesis))
            })
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hypothesis)| hypothesis.clone())
    }

    #[must_use]
    pub fn into_history(self) -> Vec<HistoryEntry> {
        self.history
    }
}
