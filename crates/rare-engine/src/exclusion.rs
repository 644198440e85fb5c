//! Session-scoped exclusion memory.

use std::collections::HashSet;

use rare_core::entities::{ExclusionEntry, PairKey};

/// Append-only record of rejected (target, drug) pairs.
///
/// Entries are never removed, and a pair is stored at most once: the first
/// rejection reason for a pair is the one kept.
#[derive(Debug, Clone, Default)]
pub struct ExclusionMemory {
    entries: Vec<ExclusionEntry>,
    keys: HashSet<PairKey>,
}

impl ExclusionMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejection. Returns `false` if the pair was already excluded.
    pub fn record(&mut self, entry: ExclusionEntry) -> bool {
        if !self.keys.insert(entry.pair_key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    #[must_use]
    pub fn contains(&self, key: &PairKey) -> bool {
        self.keys.contains(key)
    }

    /// Entries in the order they were recorded.
    #[must_use]
    pub fn entries(&self) -> &[ExclusionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
