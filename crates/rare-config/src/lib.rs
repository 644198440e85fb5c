//! # rare-config
//!
//! Layered configuration loading for RareAgent using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RAREAGENT_*` prefix, `__` as separator)
//! 2. `GROQ_API_KEY` (mapped to `reasoning.api_key`)
//! 3. Project-level `.rareagent/config.toml`
//! 4. User-level `~/.config/rareagent/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RAREAGENT_SESSION__MAX_ITERATIONS` -> `session.max_iterations`,
//! `RAREAGENT_REASONING__MODEL` -> `reasoning.model`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use rare_config::RareConfig;
//!
//! let config = RareConfig::load_with_dotenv().expect("config");
//! if config.reasoning.is_configured() {
//!     println!("model: {}", config.reasoning.model);
//! }
//! ```

mod error;
mod literature;
mod reasoning;
mod registry;
mod session;
mod skeptic;

pub use error::ConfigError;
pub use literature::LiteratureConfig;
pub use reasoning::ReasoningConfig;
pub use registry::RegistryConfig;
pub use session::SessionConfig;
pub use skeptic::SkepticConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for all RareAgent settings.
pub const ENV_PREFIX: &str = "RAREAGENT_";

/// Provider-native variable accepted for the reasoning API key.
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RareConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    #[serde(default)]
    pub skeptic: SkepticConfig,
    #[serde(default)]
    pub literature: LiteratureConfig,
}

impl RareConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate session limits.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the current directory (or the
    /// workspace root under `cargo test`) before building the figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Load with an explicit TOML file layered above the discovered files.
    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            return Err(ConfigError::InvalidValue {
                field: String::from("config"),
                reason: format!("file not found: {}", path.display()),
            });
        }
        let figment = Self::figment()
            .merge(Toml::file(path))
            .merge(Self::env_provider());
        Self::from_figment(figment)
    }

    /// Extract and validate from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.session.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".rareagent/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: provider-native key, then prefixed env (highest priority)
        figment
            .merge(
                Env::raw()
                    .only(&[GROQ_API_KEY_VAR])
                    .map(|_| "reasoning.api_key".into()),
            )
            .merge(Self::env_provider())
    }

    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rareagent").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Silently does nothing if
    /// no `.env` is found.
    fn load_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
