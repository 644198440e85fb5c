//! PubChem PUG REST client.
//!
//! Compound names resolve to CIDs through the exact-name endpoint; interaction
//! evidence comes from the compound's bioassay summary table.

use rare_core::entities::{CompoundId, TargetId};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    RegistryClient,
    error::RegistryError,
    http::{check_optional, check_response},
};

#[derive(Deserialize)]
struct CidsResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: IdentifierList,
}

#[derive(Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID", default)]
    cid: Vec<u64>,
}

#[derive(Deserialize)]
struct AssaySummaryResponse {
    #[serde(rename = "Table")]
    table: AssayTable,
}

#[derive(Deserialize)]
struct AssayTable {
    #[serde(rename = "Columns")]
    columns: AssayColumns,
    #[serde(rename = "Row", default)]
    rows: Vec<AssayRow>,
}

#[derive(Deserialize)]
struct AssayColumns {
    #[serde(rename = "Column")]
    column: Vec<String>,
}

#[derive(Deserialize)]
struct AssayRow {
    #[serde(rename = "Cell")]
    cell: Vec<Value>,
}

const OUTCOME_COLUMN: &str = "Activity Outcome";

/// Parse a compound identifier hint such as `"CID 2244"`, `"cid:2244"` or `"2244"`.
#[must_use]
pub fn parse_cid_hint(hint: &str) -> Option<u64> {
    let trimmed = hint.trim();
    let digits = match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("cid") => {
            trimmed[3..].trim_start_matches([':', ' ', '-'])
        }
        _ => trimmed,
    };
    digits.parse::<u64>().ok().filter(|cid| *cid > 0)
}

impl RegistryClient {
    /// Resolve a compound by exact name, optionally confirming an identifier hint first.
    ///
    /// A numeric hint that PubChem confirms wins outright. Otherwise the name is
    /// resolved with `name_type=complete` and the first CID (PubChem's best
    /// exact match) is taken. A non-numeric hint is tried as a second name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if PubChem cannot be reached or answers with
    /// an unexpected status. An unknown compound is `Ok(None)`.
    pub async fn pubchem_resolve_compound(
        &self,
        name: &str,
        hint: Option<&str>,
    ) -> Result<Option<CompoundId>, RegistryError> {
        let hint = hint.map(str::trim).filter(|h| !h.is_empty());

        if let Some(cid) = hint.and_then(parse_cid_hint) {
            if self.pubchem_confirm_cid(cid).await? {
                return Ok(Some(CompoundId(cid)));
            }
            tracing::debug!(cid, "identifier hint not found in PubChem, falling back to name");
        }

        if let Some(cid) = self.pubchem_cid_by_name(name).await? {
            return Ok(Some(cid));
        }

        match hint {
            Some(alias) if parse_cid_hint(alias).is_none() && !alias.eq_ignore_ascii_case(name) => {
                self.pubchem_cid_by_name(alias).await
            }
            _ => Ok(None),
        }
    }

    async fn pubchem_cid_by_name(&self, name: &str) -> Result<Option<CompoundId>, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let url = format!(
            "{}/compound/name/{}/cids/JSON?name_type=complete",
            self.config.pubchem_url,
            urlencoding::encode(name)
        );
        let resp = self.get(&url).await?;
        let resp = match check_optional(resp).await {
            Ok(Some(resp)) => resp,
            Ok(None) => return Ok(None),
            // PUGREST.BadRequest: PubChem refuses the name itself.
            Err(RegistryError::Api { status: 400, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let data: CidsResponse = resp.json().await?;
        Ok(data
            .identifier_list
            .cid
            .into_iter()
            .find(|cid| *cid > 0)
            .map(CompoundId))
    }

    async fn pubchem_confirm_cid(&self, cid: u64) -> Result<bool, RegistryError> {
        let url = format!("{}/compound/cid/{cid}/cids/JSON", self.config.pubchem_url);
        let resp = self.get(&url).await?;
        let Some(resp) = check_optional(resp).await? else {
            return Ok(false);
        };
        let data: CidsResponse = resp.json().await?;
        Ok(data.identifier_list.cid.contains(&cid))
    }

    /// Whether any bioassay reports the compound `Active` against the target.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if PubChem cannot be reached or the summary
    /// table cannot be parsed. A compound without assays is `Ok(false)`.
    pub async fn pubchem_has_active_assay(
        &self,
        compound: CompoundId,
        target: &TargetId,
    ) -> Result<bool, RegistryError> {
        let url = format!(
            "{}/compound/cid/{}/assaysummary/JSON",
            self.config.pubchem_url, compound.0
        );
        let resp = self.get(&url).await?;
        let Some(resp) = check_optional(resp).await? else {
            return Ok(false);
        };
        let body = resp.text().await?;
        let data: AssaySummaryResponse =
            serde_json::from_str(&body).map_err(|e| RegistryError::Parse(e.to_string()))?;
        let active = active_against(&data.table, target);
        tracing::debug!(%compound, %target, active, rows = data.table.rows.len(), "assay summary checked");
        Ok(active)
    }
}

fn active_against(table: &AssayTable, target: &TargetId) -> bool {
    let columns = &table.columns.column;
    let Some(outcome) = columns.iter().position(|c| c == OUTCOME_COLUMN) else {
        return false;
    };
    let target_columns: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.starts_with("Target"))
        .map(|(i, _)| i)
        .collect();

    table.rows.iter().any(|row| {
        let is_active = row
            .cell
            .get(outcome)
            .is_some_and(|v| cell_text(v).eq_ignore_ascii_case("active"));
        is_active
            && target_columns.iter().any(|&i| {
                row.cell
                    .get(i)
                    .is_some_and(|v| names_target(&cell_text(v), target))
            })
    })
}

fn names_target(cell: &str, target: &TargetId) -> bool {
    let cell = cell.trim();
    if cell.is_empty() {
        return false;
    }
    // Versioned accessions appear as `P23219.2`.
    let bare = cell.split('.').next().unwrap_or(cell);
    bare.eq_ignore_ascii_case(&target.accession)
        || target
            .gene_symbol
            .as_deref()
            .is_some_and(|g| cell.eq_ignore_ascii_case(g))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSAY_FIXTURE: &str = r#"{
        "Table": {
            "Columns": {
                "Column": ["AID", "SID", "CID", "Activity Outcome", "Target Accession", "Target GeneID", "Assay Name"]
            },
            "Row": [
                {"Cell": [1000, 103, 2244, "Inactive", "P35354", 5743, "COX-2 screen"]},
                {"Cell": [1001, 103, 2244, "Active", "P23219.1", 5742, "COX-1 inhibition"]},
                {"Cell": [1002, 103, 2244, "Unspecified", "", "", "cytotoxicity"]}
            ]
        }
    }"#;

    fn table() -> AssayTable {
        serde_json::from_str::<AssaySummaryResponse>(ASSAY_FIXTURE)
            .unwrap()
            .table
    }

    #[test]
    fn parse_cid_hints() {
        assert_eq!(parse_cid_hint("CID 2244"), Some(2244));
        assert_eq!(parse_cid_hint("cid:2244"), Some(2244));
        assert_eq!(parse_cid_hint(" 2244 "), Some(2244));
        assert_eq!(parse_cid_hint("0"), None);
        assert_eq!(parse_cid_hint("DB00945"), None);
        assert_eq!(parse_cid_hint(""), None);
    }

    #[test]
    fn parse_cids_response() {
        let data: CidsResponse =
            serde_json::from_str(r#"{"IdentifierList": {"CID": [2244, 5161]}}"#).unwrap();
        assert_eq!(data.identifier_list.cid, vec![2244, 5161]);
    }

    #[test]
    fn active_row_with_versioned_accession_counts() {
        let target = TargetId::new("P23219", Some("PTGS1".into()));
        assert!(active_against(&table(), &target));
    }

    #[test]
    fn inactive_rows_do_not_count() {
        let target = TargetId::new("P35354", Some("PTGS2".into()));
        assert!(!active_against(&table(), &target));
    }

    #[test]
    fn table_without_outcome_column_has_no_evidence() {
        let data: AssaySummaryResponse = serde_json::from_str(
            r#"{"Table": {"Columns": {"Column": ["AID", "Target Accession"]}, "Row": [{"Cell": [1, "P23219"]}]}}"#,
        )
        .unwrap();
        assert!(!active_against(&data.table, &TargetId::new("P23219", None)));
    }
}
