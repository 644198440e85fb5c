//! NCBI E-utilities identification and result limits.

use serde::{Deserialize, Serialize};

fn default_tool() -> String {
    String::from("rareagent")
}

const fn default_retmax() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LiteratureConfig {
    /// Contact email NCBI asks E-utilities clients to send.
    #[serde(default)]
    pub email: String,

    #[serde(default = "default_tool")]
    pub tool: String,

    /// Maximum PMIDs fetched per search.
    #[serde(default = "default_retmax")]
    pub retmax: u32,
}

impl Default for LiteratureConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            tool: default_tool(),
            retmax: default_retmax(),
        }
    }
}
