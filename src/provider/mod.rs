//! Upstream provider identities and the route table that selects them.
//!
//! Each inbound relay route maps to exactly one [`Provider`]. The provider
//! decides which base URL and credential apply and how the credential is
//! presented in the upstream `Authorization` header.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Path prefix → provider. Matched segment-wise, first hit wins.
pub const ROUTES: &[(&str, Provider)] = &[
    ("/api/openai", Provider::OpenAi),
    ("/api/chat-stream", Provider::OpenAi),
    ("/api/hugging-face", Provider::HuggingFace),
    ("/api/diffusion", Provider::Diffusion),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    HuggingFace,
    Diffusion,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::HuggingFace, Provider::Diffusion];

    /// Resolve the provider serving an inbound request path.
    pub fn from_path(path: &str) -> Option<Self> {
        ROUTES
            .iter()
            .find(|(prefix, _)| {
                path.strip_prefix(prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .map(|(_, provider)| *provider)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::HuggingFace => "hugging-face",
            Provider::Diffusion => "diffusion",
        }
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        match self {
            Provider::OpenAi | Provider::HuggingFace => AuthScheme::Bearer,
            Provider::Diffusion => AuthScheme::Basic,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a credential is presented to the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Bearer,
    Basic,
}

impl AuthScheme {
    /// Build the `Authorization` header value for a credential.
    ///
    /// Basic credentials may be configured either pre-encoded or as a raw
    /// `user:password` pair; the latter is base64 encoded here.
    pub fn header_value(&self, credential: &Secret) -> String {
        let token = credential.expose();
        match self {
            AuthScheme::Bearer => format!("Bearer {}", token),
            AuthScheme::Basic if token.contains(':') => {
                format!("Basic {}", STANDARD.encode(token.as_bytes()))
            }
            AuthScheme::Basic => format!("Basic {}", token),
        }
    }
}

/// A provider credential. Never printed, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `None` for unset or blank values.
    ///
    /// The untrimmed input is wiped once the trimmed copy is taken.
    pub fn non_empty(value: Option<String>) -> Option<Self> {
        let raw = Zeroizing::new(value?);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Custom Debug impl that never logs credentials
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}
