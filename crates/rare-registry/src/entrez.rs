//! NCBI E-utilities client (PubMed ESearch).

use rare_config::LiteratureConfig;
use rare_core::responses::LiteratureEvidence;
use serde::Deserialize;

use crate::{RegistryClient, error::RegistryError, http::check_response};

#[derive(Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Deserialize)]
struct ESearchResult {
    #[serde(default)]
    count: String,
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

impl ESearchResult {
    fn into_evidence(self, query: &str) -> Result<LiteratureEvidence, RegistryError> {
        if let Some(error) = self.error {
            return Err(RegistryError::Parse(format!("esearch: {error}")));
        }
        let total_count = if self.count.is_empty() {
            0
        } else {
            self.count
                .parse()
                .map_err(|_| RegistryError::Parse(format!("esearch count: {}", self.count)))?
        };
        Ok(LiteratureEvidence {
            source: String::from("pubmed"),
            query: query.to_string(),
            total_count,
            ids: self.idlist,
        })
    }
}

impl RegistryClient {
    /// Search PubMed titles and abstracts for `disease`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if E-utilities cannot be reached or reports
    /// a query error.
    pub async fn pubmed_search(
        &self,
        disease: &str,
        literature: &LiteratureConfig,
    ) -> Result<LiteratureEvidence, RegistryError> {
        let term = format!("{}[Title/Abstract]", disease.trim());
        let mut url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json&tool={}",
            self.config.eutils_url,
            urlencoding::encode(&term),
            literature.retmax,
            urlencoding::encode(&literature.tool),
        );
        if !literature.email.is_empty() {
            url.push_str("&email=");
            url.push_str(&urlencoding::encode(&literature.email));
        }
        let resp = check_response(self.get(&url).await?).await?;
        let data: ESearchResponse = resp.json().await?;
        data.esearchresult.into_evidence(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_esearch_response() {
        let data: ESearchResponse = serde_json::from_str(
            r#"{
                "header": {"type": "esearch", "version": "0.3"},
                "esearchresult": {
                    "count": "1342",
                    "retmax": "3",
                    "retstart": "0",
                    "idlist": ["39012345", "38999871", "38811102"]
                }
            }"#,
        )
        .unwrap();
        let evidence = data
            .esearchresult
            .into_evidence("Fabry disease[Title/Abstract]")
            .unwrap();
        assert_eq!(evidence.source, "pubmed");
        assert_eq!(evidence.total_count, 1342);
        assert_eq!(evidence.ids.len(), 3);
    }

    #[test]
    fn esearch_error_is_reported() {
        let data: ESearchResponse = serde_json::from_str(
            r#"{"esearchresult": {"ERROR": "Invalid query", "idlist": []}}"#,
        )
        .unwrap();
        assert!(matches!(
            data.esearchresult.into_evidence("x"),
            Err(RegistryError::Parse(_))
        ));
    }
}
