//! UniProtKB REST client.
//!
//! Target resolution only accepts reviewed (Swiss-Prot) entries for the
//! configured organism. Disease association search follows the cursor
//! `Link` header for a bounded number of pages.

use rare_core::entities::TargetId;
use serde::{Deserialize, Serialize};

use crate::{
    RegistryClient,
    error::RegistryError,
    http::{check_response, next_link},
};

const FIELDS: &str = "accession,gene_primary,protein_name,cc_disease";
const PAGE_SIZE: u32 = 100;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    primary_accession: String,
    #[serde(default)]
    genes: Vec<RawGene>,
    protein_description: Option<RawProteinDescription>,
    #[serde(default)]
    comments: Vec<RawComment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGene {
    gene_name: Option<RawValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProteinDescription {
    recommended_name: Option<RawName>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawName {
    full_name: Option<RawValue>,
}

#[derive(Deserialize)]
struct RawValue {
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComment {
    comment_type: String,
    disease: Option<RawDisease>,
    note: Option<RawNote>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDisease {
    disease_id: Option<String>,
    acronym: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawNote {
    #[serde(default)]
    texts: Vec<RawValue>,
}

/// Disease annotation attached to a UniProt entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseNote {
    pub name: String,
    pub acronym: Option<String>,
    pub description: Option<String>,
}

/// A reviewed UniProt entry reduced to the fields exploration needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniprotEntry {
    pub accession: String,
    pub gene_symbol: Option<String>,
    pub protein_name: Option<String>,
    pub diseases: Vec<DiseaseNote>,
}

impl UniprotEntry {
    /// Whether one of the entry's DISEASE annotations names `disease`.
    #[must_use]
    pub fn annotates_disease(&self, disease: &str) -> bool {
        let needle = disease.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.diseases.iter().any(|d| {
            let name = d.name.to_lowercase();
            name.contains(&needle)
                || needle.contains(&name)
                || d.acronym
                    .as_deref()
                    .is_some_and(|a| a.eq_ignore_ascii_case(&needle))
        })
    }

    /// First disease description, used as the phenotype note.
    #[must_use]
    pub fn phenotype(&self) -> Option<&str> {
        self.diseases.iter().find_map(|d| d.description.as_deref())
    }

    #[must_use]
    pub fn target_id(&self) -> TargetId {
        TargetId::new(self.accession.clone(), self.gene_symbol.clone())
    }
}

impl From<RawEntry> for UniprotEntry {
    fn from(raw: RawEntry) -> Self {
        let diseases = raw
            .comments
            .into_iter()
            .filter(|c| c.comment_type == "DISEASE")
            .filter_map(|c| {
                let note = c
                    .note
                    .and_then(|n| n.texts.into_iter().next())
                    .map(|t| t.value);
                let disease = c.disease?;
                Some(DiseaseNote {
                    name: disease.disease_id?,
                    acronym: disease.acronym,
                    description: disease.description.or(note),
                })
            })
            .collect();
        Self {
            accession: raw.primary_accession,
            gene_symbol: raw
                .genes
                .into_iter()
                .find_map(|g| g.gene_name.map(|n| n.value)),
            protein_name: raw
                .protein_description
                .and_then(|d| d.recommended_name)
                .and_then(|n| n.full_name)
                .map(|v| v.value),
            diseases,
        }
    }
}

/// Whether `s` has the shape of a UniProtKB accession (`P04637`, `A0A024R161`).
#[must_use]
pub fn looks_like_accession(s: &str) -> bool {
    let b = s.as_bytes();
    let alnum = |c: u8| c.is_ascii_uppercase() || c.is_ascii_digit();
    match b.len() {
        6 if matches!(b[0], b'O' | b'P' | b'Q') => {
            b[1].is_ascii_digit() && b[2..5].iter().all(|&c| alnum(c)) && b[5].is_ascii_digit()
        }
        6 => six_char_tail(b),
        10 => six_char_tail(&b[..6]) && b[6].is_ascii_uppercase() && alnum(b[7]) && alnum(b[8]) && b[9].is_ascii_digit(),
        _ => false,
    }
}

fn six_char_tail(b: &[u8]) -> bool {
    let alnum = |c: u8| c.is_ascii_uppercase() || c.is_ascii_digit();
    b[0].is_ascii_uppercase()
        && !matches!(b[0], b'O' | b'P' | b'Q')
        && b[1].is_ascii_digit()
        && b[2].is_ascii_uppercase()
        && alnum(b[3])
        && alnum(b[4])
        && b[5].is_ascii_digit()
}

impl RegistryClient {
    fn uniprot_search_url(&self, query: &str, size: u32) -> String {
        format!(
            "{}/uniprotkb/search?query={}&fields={FIELDS}&format=json&size={size}",
            self.config.uniprot_url,
            urlencoding::encode(query)
        )
    }

    /// Resolve a gene symbol (or accession) to a reviewed UniProt entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if UniProt cannot be reached or the response
    /// cannot be parsed. No reviewed match is `Ok(None)`.
    pub async fn uniprot_resolve_target(
        &self,
        symbol: &str,
    ) -> Result<Option<TargetId>, RegistryError> {
        let symbol = symbol.trim();
        if symbol.is_empty() || symbol.contains('"') {
            return Ok(None);
        }
        let query = if looks_like_accession(symbol) {
            format!("accession:{symbol} AND reviewed:true")
        } else {
            format!(
                "gene_exact:\"{symbol}\" AND organism_id:{} AND reviewed:true",
                self.config.organism_id
            )
        };
        let resp = check_response(self.get(&self.uniprot_search_url(&query, 5)).await?).await?;
        let data: SearchResponse = resp.json().await?;
        Ok(data
            .results
            .into_iter()
            .next()
            .map(|raw| UniprotEntry::from(raw).target_id()))
    }

    /// Reviewed entries of the configured organism annotated with `disease`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the first page cannot be fetched. A failure
    /// on a later page keeps the entries already collected.
    pub async fn uniprot_disease_entries(
        &self,
        disease: &str,
    ) -> Result<Vec<UniprotEntry>, RegistryError> {
        let disease = disease.trim().replace('"', "");
        let query = format!(
            "(cc_disease:\"{disease}\") AND organism_id:{} AND reviewed:true",
            self.config.organism_id
        );
        let mut url = Some(self.uniprot_search_url(&query, PAGE_SIZE));
        let mut entries = Vec::new();
        let mut pages = 0;

        while let Some(next) = url.take() {
            if pages >= self.config.max_pages {
                tracing::debug!(pages, "uniprot page limit reached");
                break;
            }
            let result = async {
                let resp = check_response(self.get(&next).await?).await?;
                let link = next_link(resp.headers());
                let data: SearchResponse = resp.json().await?;
                Ok::<_, RegistryError>((data, link))
            }
            .await;
            match result {
                Ok((data, link)) => {
                    entries.extend(data.results.into_iter().map(UniprotEntry::from));
                    url = link;
                }
                Err(e) if pages == 0 => return Err(e),
                Err(e) => {
                    tracing::warn!(%e, pages, "uniprot pagination stopped early");
                    break;
                }
            }
            pages += 1;
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FIXTURE: &str = r#"{
        "results": [
            {
                "primaryAccession": "P13569",
                "genes": [{"geneName": {"value": "CFTR"}}],
                "proteinDescription": {
                    "recommendedName": {"fullName": {"value": "Cystic fibrosis transmembrane conductance regulator"}}
                },
                "comments": [
                    {
                        "commentType": "DISEASE",
                        "disease": {
                            "diseaseId": "Cystic fibrosis",
                            "acronym": "CF",
                            "description": "A common generalized disorder of the exocrine glands."
                        }
                    },
                    {"commentType": "FUNCTION"}
                ]
            },
            {
                "primaryAccession": "Q9Y6X9",
                "genes": [],
                "comments": []
            }
        ]
    }"#;

    #[test]
    fn parse_search_response() {
        let data: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let entries: Vec<UniprotEntry> = data.results.into_iter().map(UniprotEntry::from).collect();
        assert_eq!(entries.len(), 2);

        let cftr = &entries[0];
        assert_eq!(cftr.accession, "P13569");
        assert_eq!(cftr.gene_symbol.as_deref(), Some("CFTR"));
        assert_eq!(cftr.diseases.len(), 1);
        assert!(cftr.annotates_disease("cystic fibrosis"));
        assert!(cftr.annotates_disease("CF"));
        assert!(cftr.phenotype().unwrap().starts_with("A common"));

        assert!(entries[1].gene_symbol.is_none());
        assert!(!entries[1].annotates_disease("cystic fibrosis"));
    }

    #[test]
    fn accession_shapes() {
        assert!(looks_like_accession("P04637"));
        assert!(looks_like_accession("Q9Y6X9"));
        assert!(looks_like_accession("A2BC19"));
        assert!(looks_like_accession("A0A024R161"));
        assert!(!looks_like_accession("TP53"));
        assert!(!looks_like_accession("S100A8"));
        assert!(!looks_like_accession("CFTR"));
        assert!(!looks_like_accession("p04637"));
    }
}
