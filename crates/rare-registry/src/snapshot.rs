//! Offline registry snapshot.
//!
//! A JSON file of known compounds, targets and interactions that answers the
//! same lookups as the live registries. Validation against an unchanged
//! snapshot is fully reproducible.
//!
//! ```json
//! {
//!   "compounds": { "aspirin": 2244 },
//!   "targets": { "PTGS1": "P23219" },
//!   "interactions": [ { "cid": 2244, "accession": "P23219" } ]
//! }
//! ```

use std::{collections::BTreeMap, path::Path};

use rare_core::entities::{CompoundId, TargetId};
use serde::{Deserialize, Serialize};

use crate::{ReferenceVerifier, error::RegistryError, pubchem::parse_cid_hint};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotInteraction {
    pub cid: u64,
    pub accession: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Compound name (any case) to PubChem CID.
    #[serde(default)]
    pub compounds: BTreeMap<String, u64>,
    /// Gene symbol (any case) to UniProt accession.
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
    #[serde(default)]
    pub interactions: Vec<SnapshotInteraction>,
}

impl RegistrySnapshot {
    /// Read a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Snapshot`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Snapshot(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Snapshot`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(json).map_err(|e| RegistryError::Snapshot(e.to_string()))
    }

    #[must_use]
    pub fn with_compound(mut self, name: &str, cid: u64) -> Self {
        self.compounds.insert(name.to_string(), cid);
        self
    }

    #[must_use]
    pub fn with_target(mut self, symbol: &str, accession: &str) -> Self {
        self.targets.insert(symbol.to_string(), accession.to_string());
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, cid: u64, accession: &str) -> Self {
        self.interactions.push(SnapshotInteraction {
            cid,
            accession: accession.to_string(),
        });
        self
    }

    fn compound_by_name(&self, name: &str) -> Option<CompoundId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.compounds
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, cid)| CompoundId(*cid))
    }

    fn lookup_compound(&self, name: &str, hint: Option<&str>) -> Option<CompoundId> {
        let hint = hint.map(str::trim).filter(|h| !h.is_empty());
        if let Some(cid) = hint.and_then(parse_cid_hint)
            && self.compounds.values().any(|known| *known == cid)
        {
            return Some(CompoundId(cid));
        }
        self.compound_by_name(name).or_else(|| {
            hint.filter(|h| parse_cid_hint(h).is_none())
                .and_then(|alias| self.compound_by_name(alias))
        })
    }

    fn lookup_target(&self, symbol: &str) -> Option<TargetId> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return None;
        }
        self.targets
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(symbol))
            .or_else(|| {
                self.targets
                    .iter()
                    .find(|(_, accession)| accession.eq_ignore_ascii_case(symbol))
            })
            .map(|(gene, accession)| TargetId::new(accession.clone(), Some(gene.to_uppercase())))
    }

    fn lookup_interaction(&self, compound: CompoundId, target: &TargetId) -> bool {
        self.interactions
            .iter()
            .any(|i| i.cid == compound.0 && i.accession.eq_ignore_ascii_case(&target.accession))
    }
}

impl ReferenceVerifier for RegistrySnapshot {
    async fn resolve_compound(
        &self,
        name: &str,
        hint: Option<&str>,
    ) -> Result<Option<CompoundId>, RegistryError> {
        Ok(self.lookup_compound(name, hint))
    }

    async fn resolve_target(&self, symbol: &str) -> Result<Option<TargetId>, RegistryError> {
        Ok(self.lookup_target(symbol))
    }

    async fn has_interaction_evidence(
        &self,
        compound: CompoundId,
        target: &TargetId,
    ) -> Result<bool, RegistryError> {
        Ok(self.lookup_interaction(compound, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> RegistrySnapshot {
        RegistrySnapshot::default()
            .with_compound("Aspirin", 2244)
            .with_compound("Ibuprofen", 3672)
            .with_target("PTGS1", "P23219")
            .with_interaction(2244, "P23219")
    }

    #[test]
    fn compounds_resolve_case_insensitively() {
        let snap = snapshot();
        assert_eq!(snap.lookup_compound("aspirin", None), Some(CompoundId(2244)));
        assert_eq!(snap.lookup_compound("ASPIRIN", None), Some(CompoundId(2244)));
        assert_eq!(snap.lookup_compound("unobtainium", None), None);
    }

    #[test]
    fn known_cid_hint_wins_over_name() {
        let snap = snapshot();
        assert_eq!(
            snap.lookup_compound("Aspirin", Some("CID 3672")),
            Some(CompoundId(3672))
        );
        // unknown CID falls back to the name
        assert_eq!(
            snap.lookup_compound("Aspirin", Some("CID 999")),
            Some(CompoundId(2244))
        );
        // non-numeric hint is an alias
        assert_eq!(
            snap.lookup_compound("Advil", Some("ibuprofen")),
            Some(CompoundId(3672))
        );
    }

    #[test]
    fn targets_resolve_by_symbol_or_accession() {
        let snap = snapshot();
        let by_symbol = snap.lookup_target("ptgs1").unwrap();
        let by_accession = snap.lookup_target("P23219").unwrap();
        assert_eq!(by_symbol, by_accession);
        assert_eq!(by_symbol.gene_symbol.as_deref(), Some("PTGS1"));
        assert!(snap.lookup_target("T1").is_none());
    }

    #[test]
    fn interactions_need_both_ids() {
        let snap = snapshot();
        let ptgs1 = TargetId::new("P23219", None);
        assert!(snap.lookup_interaction(CompoundId(2244), &ptgs1));
        assert!(!snap.lookup_interaction(CompoundId(3672), &ptgs1));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"{"compounds": {"aspirin": 2244}, "targets": {"PTGS1": "P23219"}}"#,
        )
        .unwrap();
        let snap = RegistrySnapshot::load(&path).unwrap();
        assert_eq!(snap.compounds.len(), 1);
        assert!(snap.interactions.is_empty());

        assert!(matches!(
            RegistrySnapshot::load(dir.path().join("missing.json")),
            Err(RegistryError::Snapshot(_))
        ));
    }
}
