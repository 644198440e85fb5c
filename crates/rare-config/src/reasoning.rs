//! Language-model endpoint used by the proponent and skeptic roles.

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    String::from("https://api.groq.com/openai/v1/chat/completions")
}

fn default_model() -> String {
    String::from("llama-3.3-70b-versatile")
}

const fn default_temperature() -> f64 {
    0.7
}

const fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReasoningConfig {
    /// OpenAI-compatible chat completions endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: String::new(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ReasoningConfig {
    /// Check if the reasoning endpoint has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.model.is_empty() && !self.api_key.trim().is_empty()
    }
}
