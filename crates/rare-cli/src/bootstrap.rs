use std::sync::Arc;

use anyhow::Context;
use rare_config::RareConfig;
use rare_registry::RegistryClient;
use rare_roles::llm::ChatClient;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RareConfig> {
    match &flags.config {
        Some(path) => {
            if let Err(error) = dotenvy::dotenv()
                && !error.not_found()
            {
                tracing::warn!(%error, "failed to load .env");
            }
            RareConfig::load_from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => RareConfig::load_with_dotenv().context("failed to load configuration"),
    }
}

pub fn registry_client(config: &RareConfig) -> anyhow::Result<Arc<RegistryClient>> {
    RegistryClient::new(&config.registry)
        .map(Arc::new)
        .context("failed to build registry client")
}

pub fn chat_client(config: &RareConfig) -> anyhow::Result<ChatClient> {
    ChatClient::new(&config.reasoning).context("reasoning roles unavailable")
}
