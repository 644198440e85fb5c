//! # rare-registry
//!
//! Reference registry clients for RareAgent.
//!
//! Provides the lookups the deterministic validator and the target explorer
//! build on:
//! - PubChem PUG REST: compound name → CID, bioassay interaction evidence
//! - UniProtKB REST: gene symbol → reviewed accession, disease-annotated entries
//! - NCBI E-utilities: PubMed literature counts
//! - [`RegistrySnapshot`]: an offline, reproducible stand-in for the live services
//!
//! Lookups distinguish "resolved to nothing" (`Ok(None)` / `Ok(false)`) from
//! "could not ask" (`Err(RegistryError)`). Callers must never turn the latter
//! into a rejection.

pub mod entrez;
pub mod pubchem;
pub mod snapshot;
pub mod uniprot;

mod error;
mod http;

pub use error::RegistryError;
pub use http::RateLimiter;
pub use snapshot::RegistrySnapshot;
pub use uniprot::{DiseaseNote, UniprotEntry};

use std::{future::Future, sync::Arc, time::Duration};

use rare_config::RegistryConfig;
use rare_core::entities::{CompoundId, TargetId};

/// The two independent lookups and the interaction check used by validation.
///
/// Implementations are side-effect free against the registries they query.
pub trait ReferenceVerifier: Send + Sync {
    /// Canonical compound id for a drug name, with an optional identifier hint.
    fn resolve_compound(
        &self,
        name: &str,
        hint: Option<&str>,
    ) -> impl Future<Output = Result<Option<CompoundId>, RegistryError>> + Send;

    /// Canonical curated protein id for a gene symbol or accession.
    fn resolve_target(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<TargetId>, RegistryError>> + Send;

    /// Whether the registries record an interaction between the two.
    fn has_interaction_evidence(
        &self,
        compound: CompoundId,
        target: &TargetId,
    ) -> impl Future<Output = Result<bool, RegistryError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for PubChem, UniProt and NCBI E-utilities.
///
/// One client paces all of its requests through a single [`RateLimiter`].
#[derive(Debug)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
    limiter: RateLimiter,
}

impl RegistryClient {
    /// Create a client for the configured registry endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("rareagent/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
            limiter: RateLimiter::new(Duration::from_millis(config.min_request_interval_ms)),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RegistryError> {
        self.limiter.acquire().await;
        tracing::debug!(url, "registry request");
        Ok(self.http.get(url).send().await?)
    }
}

impl ReferenceVerifier for RegistryClient {
    async fn resolve_compound(
        &self,
        name: &str,
        hint: Option<&str>,
    ) -> Result<Option<CompoundId>, RegistryError> {
        self.pubchem_resolve_compound(name, hint).await
    }

    async fn resolve_target(&self, symbol: &str) -> Result<Option<TargetId>, RegistryError> {
        self.uniprot_resolve_target(symbol).await
    }

    async fn has_interaction_evidence(
        &self,
        compound: CompoundId,
        target: &TargetId,
    ) -> Result<bool, RegistryError> {
        self.pubchem_has_active_assay(compound, target).await
    }
}

/// Lets the explorer and the validator share one rate-limited client.
impl<T: ReferenceVerifier> ReferenceVerifier for Arc<T> {
    fn resolve_compound(
        &self,
        name: &str,
        hint: Option<&str>,
    ) -> impl Future<Output = Result<Option<CompoundId>, RegistryError>> + Send {
        self.as_ref().resolve_compound(name, hint)
    }

    fn resolve_target(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<TargetId>, RegistryError>> + Send {
        self.as_ref().resolve_target(symbol)
    }

    fn has_interaction_evidence(
        &self,
        compound: CompoundId,
        target: &TargetId,
    ) -> impl Future<Output = Result<bool, RegistryError>> + Send {
        self.as_ref().has_interaction_evidence(compound, target)
    }
}
