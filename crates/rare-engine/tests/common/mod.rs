//! Scripted roles and registries for session tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rare_config::SessionConfig;
use rare_core::entities::{
    CompoundId, Critique, DiseaseQuery, ExclusionEntry, Hypothesis, TargetCandidate, TargetId,
};
use rare_core::enums::{CritiqueVerdict, TargetSource};
use rare_core::ids::HypothesisId;
use rare_core::responses::{Exploration, ProposalResponse};
use rare_registry::{ReferenceVerifier, RegistryError, RegistrySnapshot};
use rare_roles::{Proponent, ProposalContext, RoleError, Skeptic, TargetExplorer};

pub fn target(symbol: &str, priority: f64) -> TargetCandidate {
    TargetCandidate {
        identifier: symbol.into(),
        accession: None,
        source: TargetSource::Uniprot,
        priority,
        protein_name: None,
        phenotype: None,
    }
}

pub fn query(name: &str) -> DiseaseQuery {
    DiseaseQuery::new(name, &[]).unwrap()
}

/// Fast timeouts and short backoff so paused-clock tests stay small.
pub fn config() -> SessionConfig {
    SessionConfig {
        max_iterations: 10,
        consensus_threshold: 0.7,
        timeout_per_step_ms: 1_000,
        max_retries: 3,
        max_proposal_attempts: 3,
        backoff_initial_ms: 10,
        backoff_max_ms: 100,
        trail_dir: String::new(),
    }
}

/// Registry of the worked example: DrugA and DrugB both resolve, T1 resolves,
/// only DrugB has evidence against T1.
pub fn snapshot() -> RegistrySnapshot {
    RegistrySnapshot::default()
        .with_compound("DrugA", 12345)
        .with_compound("DrugB", 67890)
        .with_target("T1", "P99999")
        .with_target("T2", "Q88888")
        .with_interaction(67890, "P99999")
}

// ── Explorer ───────────────────────────────────────────────────────

pub struct FixedExplorer {
    candidates: Option<Vec<TargetCandidate>>,
    pub calls: AtomicU32,
}

impl FixedExplorer {
    pub fn new(candidates: Vec<TargetCandidate>) -> Self {
        Self {
            candidates: Some(candidates),
            calls: AtomicU32::new(0),
        }
    }

    /// Every target source is down.
    pub fn unavailable() -> Self {
        Self {
            candidates: None,
            calls: AtomicU32::new(0),
        }
    }
}

impl TargetExplorer for FixedExplorer {
    async fn explore(&self, _query: &DiseaseQuery) -> Result<Exploration, RoleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.candidates {
            Some(candidates) => Ok(Exploration {
                candidates: candidates.clone(),
                literature: None,
            }),
            None => Err(RoleError::DataSourceUnavailable("uniprot: 503".into())),
        }
    }
}

// ── Proponent ──────────────────────────────────────────────────────

/// What the proponent was shown on one call.
#[derive(Debug, Clone)]
pub struct SeenContext {
    pub id: HypothesisId,
    pub target: String,
    pub parent: Option<HypothesisId>,
    pub exclusions: Vec<ExclusionEntry>,
    pub feedback: Vec<String>,
    pub tried: Vec<String>,
}

/// Proposes drugs from a script, cycling once it runs out.
pub struct ScriptedProponent {
    script: Vec<(&'static str, &'static str)>,
    pub calls: AtomicU32,
    pub seen: Mutex<Vec<SeenContext>>,
}

impl ScriptedProponent {
    pub fn new(script: &[(&'static str, &'static str)]) -> Self {
        Self {
            script: script.to_vec(),
            calls: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenContext> {
        self.seen.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Proponent for ScriptedProponent {
    async fn propose(&self, ctx: &ProposalContext<'_>) -> Result<Hypothesis, RoleError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.seen.lock().unwrap().push(SeenContext {
            id: ctx.id,
            target: ctx.target.identifier.clone(),
            parent: ctx.parent.map(|p| p.id),
            exclusions: ctx.exclusions.to_vec(),
            feedback: ctx.feedback.to_vec(),
            tried: ctx.tried_drugs().into_iter().map(String::from).collect(),
        });
        let (drug, mechanism) = self.script[n % self.script.len()];
        Ok(ctx.hypothesis(ProposalResponse {
            drug_name: drug.into(),
            drug_identifier_hint: None,
            mechanism: mechanism.into(),
            rationale: String::new(),
        }))
    }
}

// ── Skeptic ────────────────────────────────────────────────────────

pub type ScriptedCritique = (CritiqueVerdict, f64, Vec<String>);

pub fn critique(verdict: CritiqueVerdict, confidence: f64, reasons: &[&str]) -> ScriptedCritique {
    (
        verdict,
        confidence,
        reasons.iter().map(|r| (*r).to_string()).collect(),
    )
}

/// Returns scripted critiques in order, then approves with high confidence.
pub struct ScriptedSkeptic {
    script: Mutex<Vec<ScriptedCritique>>,
    pub calls: AtomicU32,
    repeat_last: bool,
}

impl ScriptedSkeptic {
    pub fn new(script: Vec<ScriptedCritique>) -> Self {
        Self::build(script, false)
    }

    /// Keeps returning the same critique.
    pub fn always(critique: ScriptedCritique) -> Self {
        Self::build(vec![critique], true)
    }

    pub fn approving() -> Self {
        Self::new(Vec::new())
    }

    fn build(mut script: Vec<ScriptedCritique>, repeat_last: bool) -> Self {
        script.reverse();
        Self {
            script: Mutex::new(script),
            calls: AtomicU32::new(0),
            repeat_last,
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Skeptic for ScriptedSkeptic {
    async fn critique(&self, _disease: &str, _hypothesis: &Hypothesis) -> Result<Critique, RoleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut script = self.script.lock().unwrap();
            if self.repeat_last && script.len() == 1 {
                script.last().cloned()
            } else {
                script.pop()
            }
        };
        let (verdict, confidence, reasons) =
            next.unwrap_or((CritiqueVerdict::Approve, 0.9, Vec::new()));
        Ok(Critique::new(verdict, reasons, confidence).unwrap())
    }
}

// ── Verifier ───────────────────────────────────────────────────────

/// Snapshot whose compound lookups hang for the first `slow_calls` calls.
pub struct SlowVerifier {
    inner: RegistrySnapshot,
    slow_calls: u32,
    pub compound_calls: AtomicU32,
}

impl SlowVerifier {
    pub fn new(inner: RegistrySnapshot, slow_calls: u32) -> Self {
        Self {
            inner,
            slow_calls,
            compound_calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.compound_calls.load(Ordering::SeqCst)
    }
}

impl ReferenceVerifier for SlowVerifier {
    async fn resolve_compound(
        &self,
        name: &str,
        hint: Option<&str>,
    ) -> Result<Option<CompoundId>, RegistryError> {
        let n = self.compound_calls.fetch_add(1, Ordering::SeqCst);
        if n < self.slow_calls {
            tokio::time::sleep(Duration::from_secs(3_600)).await;
        }
        self.inner.resolve_compound(name, hint).await
    }

    async fn resolve_target(&self, symbol: &str) -> Result<Option<TargetId>, RegistryError> {
        self.inner.resolve_target(symbol).await
    }

    async fn has_interaction_evidence(
        &self,
        compound: CompoundId,
        target: &TargetId,
    ) -> Result<bool, RegistryError> {
        self.inner.has_interaction_evidence(compound, target).await
    }
}
