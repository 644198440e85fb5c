//! Language-model proponent.

use std::sync::Arc;

use rare_core::entities::Hypothesis;
use rare_core::responses::ProposalResponse;
use rare_schema::SchemaRegistry;

use crate::{
    Proponent, ProposalContext, RoleError,
    llm::ChatClient,
    prompt::{PROPONENT_SYSTEM, proponent_prompt},
};

pub struct LlmProponent {
    chat: ChatClient,
    schemas: Arc<SchemaRegistry>,
}

impl LlmProponent {
    #[must_use]
    pub const fn new(chat: ChatClient, schemas: Arc<SchemaRegistry>) -> Self {
        Self { chat, schemas }
    }
}

impl Proponent for LlmProponent {
    async fn propose(&self, ctx: &ProposalContext<'_>) -> Result<Hypothesis, RoleError> {
        let content = self
            .chat
            .complete_json(PROPONENT_SYSTEM, &proponent_prompt(ctx))
            .await?;
        let response: ProposalResponse = self.schemas.parse_str("proposal_response", &content)?;
        if response.drug_name.trim().is_empty() || response.mechanism.trim().is_empty() {
            return Err(RoleError::Malformed(
                "proposal has a blank drug name or mechanism".into(),
            ));
        }
        if ctx.is_excluded(&response.drug_name) {
            tracing::warn!(
                target_id = %ctx.target.identifier,
                drug = %response.drug_name,
                "proponent repeated an excluded pair"
            );
        }
        Ok(ctx.hypothesis(response))
    }
}
