//! Configuration data structures for the relay process itself.
//!
//! These settings control how the relay listens, logs and talks to
//! upstreams. Provider URLs and credentials live in [`super::ProviderEnv`].
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub listen: ListenConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Upstream forwarding settings.
    #[serde(default)]
    pub forwarding: ForwardingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `3000`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Settings for the upstream HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardingConfig {
    /// Include raw transport error text in 500 responses.
    /// Only meant for trusted debug deployments.
    /// Default: `false`
    #[serde(default)]
    pub expose_upstream_errors: bool,

    /// Maximum number of idle connections kept per upstream host.
    /// Default: `32`
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Seconds an idle pooled connection is kept open.
    /// Default: `90`
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout_seconds: u64,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            expose_upstream_errors: false,
            pool_max_idle_per_host: default_pool_max_idle(),
            pool_idle_timeout_seconds: default_pool_idle_timeout(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_pool_max_idle() -> usize {
    32
}

fn default_pool_idle_timeout() -> u64 {
    90
}
