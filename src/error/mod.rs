// Error types for aigc-relay
// Author: kelexine (https://github.com/kelexine)

use crate::provider::Provider;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message shown to browsers that must (re)enter an access code.
pub const ACCESS_CODE_MESSAGE: &str = "Please go settings page and fill your access code.";

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Access code missing or invalid")]
    AccessDenied,

    #[error("Empty Token For: {0}")]
    MissingToken(Provider),

    #[error("Unknown provider route: {0}")]
    UnknownRoute(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport failure talking to a provider. The payload is the message
    /// that is safe to hand back to the client.
    #[error("{0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert ProxyError to HTTP responses for Axum
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::AccessDenied => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": true,
                    "needAccessCode": true,
                    "msg": ACCESS_CODE_MESSAGE,
                }),
            ),
            // Server misconfiguration, but the browser client keys off 401 here
            ProxyError::MissingToken(_) => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": true, "msg": self.to_string() }),
            ),
            ProxyError::UnknownRoute(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": true, "msg": self.to_string() }),
            ),
            ProxyError::InvalidRequest(ref msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": true, "msg": msg }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": true, "msg": self.to_string() }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
