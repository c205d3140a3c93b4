// Provider environment variables
// Author: kelexine (https://github.com/kelexine)

use crate::error::{ProxyError, Result};
use config::{Config, Environment, Map};
use serde::Deserialize;

/// Raw values of the provider environment variables, before resolution.
///
/// Keys are read unprefixed (`OPENAI_API_KEY`, `CODE`, ...) to stay
/// compatible with existing deployments.
#[derive(Clone, Default, Deserialize)]
pub struct ProviderEnv {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default)]
    pub vercel: Option<String>,

    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub openai_url: Option<String>,
    #[serde(default)]
    pub openai_org_id: Option<String>,
    #[serde(default)]
    pub hugging_face_token: Option<String>,
    #[serde(default)]
    pub hugging_face_url: Option<String>,
    #[serde(default)]
    pub stable_diffusion_token: Option<String>,
    #[serde(default)]
    pub stable_diffusion_url: Option<String>,
}

impl ProviderEnv {
    pub const KEYS: &'static [&'static str] = &[
        "CODE",
        "PROXY_URL",
        "VERCEL",
        "OPENAI_API_KEY",
        "OPENAI_URL",
        "OPENAI_ORG_ID",
        "HUGGING_FACE_TOKEN",
        "HUGGING_FACE_URL",
        "STABLE_DIFFUSION_TOKEN",
        "STABLE_DIFFUSION_URL",
    ];

    /// Read the provider variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read the provider variables from an explicit set of pairs.
    /// Pairs whose key is not in [`Self::KEYS`] are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| Self::KEYS.contains(&k.as_str()))
            .collect();

        Config::builder()
            .add_source(Environment::default().source(Some(source)))
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))
    }
}

// Custom Debug impl that never logs codes or credentials
impl std::fmt::Debug for ProviderEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ProviderEnv")
            .field("code", &redact(&self.code))
            .field("proxy_url", &self.proxy_url)
            .field("vercel", &self.vercel)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openai_url", &self.openai_url)
            .field("openai_org_id", &self.openai_org_id)
            .field("hugging_face_token", &redact(&self.hugging_face_token))
            .field("hugging_face_url", &self.hugging_face_url)
            .field("stable_diffusion_token", &redact(&self.stable_diffusion_token))
            .field("stable_diffusion_url", &self.stable_diffusion_url)
            .finish()
    }
}
