use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Immutable input to a session: the disease under investigation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiseaseQuery {
    pub name: String,
    /// Known gene/protein symbols to seed the target queue with.
    #[serde(default)]
    pub target_hints: Vec<String>,
}

impl DiseaseQuery {
    /// Build a query, trimming the name and dropping blank hints.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the disease name is blank.
    pub fn new(name: &str, target_hints: &[String]) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("disease name must not be empty".into()));
        }
        let target_hints = target_hints
            .iter()
            .map(|hint| hint.trim())
            .filter(|hint| !hint.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            name: name.to_string(),
            target_hints,
        })
    }
}
