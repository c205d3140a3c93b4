//! Structured logging and credential-safe trace utilities.
//!
//! This module configures the `tracing` ecosystem for the relay and provides
//! a scrubber that keeps provider credentials out of log sinks when
//! upstream error text is logged.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{ProxyError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    result.map_err(|e| ProxyError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Credential prefixes that are masked wherever they appear.
const SECRET_MARKERS: &[(&str, &str)] = &[
    ("Bearer ", "[REDACTED_BEARER]"),
    ("Basic ", "[REDACTED_BASIC]"),
    ("sk-", "[REDACTED_API_KEY]"),
    ("hf_", "[REDACTED_HF_TOKEN]"),
];

/// Sanitizes credentials from strings before they are logged.
///
/// Every occurrence of a known marker is replaced, together with the token
/// that follows it, up to the next whitespace or quote.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    for (marker, placeholder) in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(offset) = result[search_from..].find(marker) {
            let start = search_from + offset;
            let token_start = start + marker.len();
            let end = result[token_start..]
                .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
                .map(|i| token_start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, placeholder);
            search_from = start + placeholder.len();
        }
    }

    result
}
