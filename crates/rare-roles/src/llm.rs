//! OpenAI-compatible chat-completions client.
//!
//! Requests JSON-object output and returns the raw message content with any
//! Markdown code fence removed. Callers validate the content against a schema;
//! this module only guarantees that some text came back.

use std::time::Duration;

use rare_config::ReasoningConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::RoleError;

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Chat client shared by the proponent and skeptic.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: ReasoningConfig,
}

impl ChatClient {
    /// # Errors
    ///
    /// Returns [`RoleError::NotConfigured`] without an API key, or
    /// [`RoleError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ReasoningConfig) -> Result<Self, RoleError> {
        if !config.is_configured() {
            return Err(RoleError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("rareagent/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one system + user exchange and return the JSON text of the reply.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError`] on transport failure, non-success status, or an
    /// empty completion.
    pub async fn complete_json(&self, system: &str, user: &str) -> Result<String, RoleError> {
        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        tracing::debug!(model = %self.config.model, "reasoning request");
        let resp = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(5);
            return Err(RoleError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(RoleError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let text = resp.text().await?;
        let data: ChatResponse =
            serde_json::from_str(&text).map_err(|e| RoleError::Malformed(e.to_string()))?;
        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| RoleError::Malformed(String::from("empty completion")))?;

        Ok(strip_code_fence(&content).to_string())
    }
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````), if any.
#[must_use]
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
