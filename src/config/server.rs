//! Resolved, immutable server-side configuration.
//!
//! [`ServerConfig`] is built exactly once at startup from [`ProviderEnv`] and
//! shared behind an `Arc` by the access middleware and the forwarder. It
//! holds provider secrets, so nothing in here is ever serialized back to a
//! client; the browser only learns `need_code`.
//!
//! Author: kelexine (<https://github.com/kelexine>)

#[cfg(target_arch = "wasm32")]
compile_error!("server configuration reads process environment and is server-only");

use super::ProviderEnv;
use crate::access::AccessCodeSet;
use crate::error::Result;
use crate::provider::{Provider, Secret};
use zeroize::Zeroizing;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_HUGGING_FACE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_STABLE_DIFFUSION_URL: &str = "https://diffusion.luming.fun";

/// Base URL and credential for one upstream provider.
#[derive(Debug, Clone)]
pub struct ProviderEndpoint {
    pub base_url: String,
    pub credential: Option<Secret>,
}

impl ProviderEndpoint {
    fn new(url: Option<String>, default_url: &str, credential: Option<String>) -> Self {
        let base_url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| default_url.to_string());

        Self {
            base_url,
            credential: Secret::non_empty(credential),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    codes: AccessCodeSet,
    proxy_url: Option<String>,
    is_vercel: bool,
    openai: ProviderEndpoint,
    openai_org_id: Option<String>,
    hugging_face: ProviderEndpoint,
    diffusion: ProviderEndpoint,
}

impl ServerConfig {
    /// Resolve the provider environment into the process-wide config.
    ///
    /// Access codes are hashed here and the plaintext list is wiped before
    /// returning.
    pub fn resolve(env: ProviderEnv) -> Result<Self> {
        let ProviderEnv {
            code,
            proxy_url,
            vercel,
            openai_api_key,
            openai_url,
            openai_org_id,
            hugging_face_token,
            hugging_face_url,
            stable_diffusion_token,
            stable_diffusion_url,
        } = env;

        let code = Zeroizing::new(code.unwrap_or_default());
        let codes = AccessCodeSet::from_list(&code);

        Ok(Self {
            codes,
            proxy_url: proxy_url.filter(|u| !u.trim().is_empty()),
            is_vercel: vercel.is_some_and(|v| !v.is_empty()),
            openai: ProviderEndpoint::new(openai_url, DEFAULT_OPENAI_URL, openai_api_key),
            openai_org_id: openai_org_id.filter(|id| !id.trim().is_empty()),
            hugging_face: ProviderEndpoint::new(
                hugging_face_url,
                DEFAULT_HUGGING_FACE_URL,
                hugging_face_token,
            ),
            diffusion: ProviderEndpoint::new(
                stable_diffusion_url,
                DEFAULT_STABLE_DIFFUSION_URL,
                stable_diffusion_token,
            ),
        })
    }

    /// Read the process environment and resolve it.
    pub fn from_env() -> Result<Self> {
        Self::resolve(ProviderEnv::from_env()?)
    }

    /// Whether inbound requests must present a valid access code.
    pub fn need_code(&self) -> bool {
        !self.codes.is_empty()
    }

    pub fn access_codes(&self) -> &AccessCodeSet {
        &self.codes
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }

    pub fn is_vercel(&self) -> bool {
        self.is_vercel
    }

    pub fn endpoint(&self, provider: Provider) -> &ProviderEndpoint {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::HuggingFace => &self.hugging_face,
            Provider::Diffusion => &self.diffusion,
        }
    }

    pub fn openai_org_id(&self) -> Option<&str> {
        self.openai_org_id.as_deref()
    }
}
