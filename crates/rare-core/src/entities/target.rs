use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TargetSource;

/// A gene/protein target produced by the explorer.
///
/// Consumed read-only by the proponent; never mutated after exploration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TargetCandidate {
    /// Gene or protein symbol (e.g. `CFTR`).
    pub identifier: String,
    /// UniProt accession when the source already knows it.
    pub accession: Option<String>,
    pub source: TargetSource,
    /// Priority in `[0, 1]`; higher is explored first.
    pub priority: f64,
    pub protein_name: Option<String>,
    /// Disease phenotype note from the source, if any.
    pub phenotype: Option<String>,
}

impl TargetCandidate {
    /// A caller-supplied hint with top priority.
    #[must_use]
    pub fn hint(symbol: &str) -> Self {
        Self {
            identifier: symbol.trim().to_string(),
            accession: None,
            source: TargetSource::Hint,
            priority: 1.0,
            protein_name: None,
            phenotype: None,
        }
    }

    /// Whether two candidates name the same gene (case-insensitive).
    #[must_use]
    pub fn same_gene(&self, other: &Self) -> bool {
        self.identifier.eq_ignore_ascii_case(&other.identifier)
    }
}
