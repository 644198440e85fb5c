//! Registry-backed target explorer.
//!
//! Candidate sources, highest priority first:
//! 1. caller hints (1.0)
//! 2. reviewed UniProt entries whose DISEASE annotation names the disease (0.9)
//! 3. other entries returned by the disease search (0.5)
//!
//! PubMed hit counts are attached as literature evidence. A literature failure
//! is logged and ignored.

use std::sync::Arc;

use rand::{Rng, seq::SliceRandom};
use rare_config::LiteratureConfig;
use rare_core::entities::{DiseaseQuery, TargetCandidate};
use rare_core::enums::TargetSource;
use rare_core::responses::Exploration;
use rare_registry::{RegistryClient, UniprotEntry};

use crate::{RoleError, TargetExplorer};

pub const HINT_PRIORITY: f64 = 1.0;
pub const ANNOTATED_PRIORITY: f64 = 0.9;
pub const ASSOCIATED_PRIORITY: f64 = 0.5;

pub struct RegistryExplorer {
    client: Arc<RegistryClient>,
    literature: LiteratureConfig,
}

impl RegistryExplorer {
    #[must_use]
    pub const fn new(client: Arc<RegistryClient>, literature: LiteratureConfig) -> Self {
        Self { client, literature }
    }
}

impl TargetExplorer for RegistryExplorer {
    async fn explore(&self, query: &DiseaseQuery) -> Result<Exploration, RoleError> {
        let (entries, literature) = tokio::join!(
            self.client.uniprot_disease_entries(&query.name),
            self.client.pubmed_search(&query.name, &self.literature),
        );

        let literature = literature
            .map_err(|e| tracing::warn!(%e, disease = %query.name, "literature search failed"))
            .ok();

        let mut candidates: Vec<TargetCandidate> = Vec::new();
        for hint in &query.target_hints {
            push_unique(&mut candidates, TargetCandidate::hint(hint));
        }

        match entries {
            Ok(entries) => {
                for entry in &entries {
                    if let Some(candidate) = candidate_from_entry(entry, &query.name) {
                        push_unique(&mut candidates, candidate);
                    }
                }
            }
            Err(e) if candidates.is_empty() => {
                return Err(RoleError::DataSourceUnavailable(format!("uniprot: {e}")));
            }
            Err(e) => tracing::warn!(%e, "uniprot disease search failed, using hints only"),
        }

        prioritize(&mut candidates, &mut rand::rng());
        tracing::info!(
            disease = %query.name,
            candidates = candidates.len(),
            "exploration complete"
        );
        Ok(Exploration {
            candidates,
            literature,
        })
    }
}

/// Shuffle, then stable-sort by descending priority.
///
/// Equal priorities end up in random order so literature-popular targets are
/// not always tried first.
pub fn prioritize<R: Rng + ?Sized>(candidates: &mut [TargetCandidate], rng: &mut R) {
    candidates.shuffle(rng);
    candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));
}

fn candidate_from_entry(entry: &UniprotEntry, disease: &str) -> Option<TargetCandidate> {
    let symbol = entry.gene_symbol.as_deref()?.trim();
    if symbol.is_empty() {
        return None;
    }
    let priority = if entry.annotates_disease(disease) {
        ANNOTATED_PRIORITY
    } else {
        ASSOCIATED_PRIORITY
    };
    Some(TargetCandidate {
        identifier: symbol.to_string(),
        accession: Some(entry.accession.clone()),
        source: TargetSource::Uniprot,
        priority,
        protein_name: entry.protein_name.clone(),
        phenotype: entry.phenotype().map(str::to_string),
    })
}

fn push_unique(candidates: &mut Vec<TargetCandidate>, candidate: TargetCandidate) {
    if candidate.identifier.is_empty() {
        return;
    }
    if let Some(existing) = candidates.iter_mut().find(|c| c.same_gene(&candidate)) {
        // A hint confirmed by UniProt keeps its priority but gains the metadata.
        if existing.accession.is_none() {
            existing.accession = candidate.accession;
            existing.protein_name = candidate.protein_name;
            existing.phenotype = candidate.phenotype;
        }
        return;
    }
    candidates.push(candidate);
}
