//! Reference registry endpoints (PubChem, UniProt, NCBI E-utilities).

use serde::{Deserialize, Serialize};

fn default_pubchem_url() -> String {
    String::from("https://pubchem.ncbi.nlm.nih.gov/rest/pug")
}

fn default_uniprot_url() -> String {
    String::from("https://rest.uniprot.org")
}

fn default_eutils_url() -> String {
    String::from("https://eutils.ncbi.nlm.nih.gov/entrez/eutils")
}

const fn default_organism_id() -> u32 {
    9606
}

/// PubChem allows 5 requests/second; stay under it.
const fn default_min_request_interval_ms() -> u64 {
    250
}

const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_max_pages() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RegistryConfig {
    #[serde(default = "default_pubchem_url")]
    pub pubchem_url: String,

    #[serde(default = "default_uniprot_url")]
    pub uniprot_url: String,

    #[serde(default = "default_eutils_url")]
    pub eutils_url: String,

    /// NCBI taxonomy id restricting protein lookups (9606 = human).
    #[serde(default = "default_organism_id")]
    pub organism_id: u32,

    /// Minimum spacing between requests from one client.
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on UniProt cursor pages followed per search.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            pubchem_url: default_pubchem_url(),
            uniprot_url: default_uniprot_url(),
            eutils_url: default_eutils_url(),
            organism_id: default_organism_id(),
            min_request_interval_ms: default_min_request_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: default_max_pages(),
        }
    }
}
