//! Language-model skeptic.
//!
//! The model only scores objections. The verdict comes from [`SkepticPolicy`],
//! so the approve/revise/reject boundary is configuration, not prompt text.

use std::sync::Arc;

use rare_core::entities::{Critique, Hypothesis};
use rare_core::responses::CritiqueResponse;
use rare_schema::SchemaRegistry;

use crate::{
    RoleError, Skeptic,
    llm::ChatClient,
    policy::SkepticPolicy,
    prompt::{SKEPTIC_SYSTEM, skeptic_prompt},
};

pub struct LlmSkeptic {
    chat: ChatClient,
    schemas: Arc<SchemaRegistry>,
    policy: SkepticPolicy,
}

impl LlmSkeptic {
    #[must_use]
    pub const fn new(chat: ChatClient, schemas: Arc<SchemaRegistry>, policy: SkepticPolicy) -> Self {
        Self {
            chat,
            schemas,
            policy,
        }
    }
}

impl Skeptic for LlmSkeptic {
    async fn critique(&self, disease: &str, hypothesis: &Hypothesis) -> Result<Critique, RoleError> {
        let content = self
            .chat
            .complete_json(SKEPTIC_SYSTEM, &skeptic_prompt(disease, hypothesis))
            .await?;
        let response: CritiqueResponse = self.schemas.parse_str("critique_response", &content)?;
        let critique = self
            .policy
            .assess(&response)
            .map_err(|e| RoleError::Malformed(e.to_string()))?;
        tracing::debug!(
            hypothesis = %hypothesis.id,
            verdict = %critique.verdict,
            confidence = critique.confidence,
            "critique scored"
        );
        Ok(critique)
    }
}
