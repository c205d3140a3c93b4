// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod env;
mod models;
mod server;

pub use env::ProviderEnv;
pub use models::*;
pub use server::{
    ProviderEndpoint, ServerConfig, DEFAULT_HUGGING_FACE_URL, DEFAULT_OPENAI_URL,
    DEFAULT_STABLE_DIFFUSION_URL,
};

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (prefix: AIGC_RELAY_, nesting with `__`)
    /// 2. Config file (explicit path, else ~/.aigc-relay/config.toml)
    /// 3. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("AIGC_RELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".aigc-relay")
            .join("config.toml")
    }
}
