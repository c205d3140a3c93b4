//! Axum-based HTTP server for the relay.
//!
//! This module wires the browser-facing routes: the provider pass-through
//! endpoints guarded by the access middleware, the public client config
//! endpoint, and the operational health/metrics endpoints.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (relay, config, health, metrics).
//! - `middleware`: Access-code gate, credential injection and request ID tracking.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{ClientConfigResponse, HealthResponse, HealthStatus};
pub use middleware::{client_ip, ResolvedRoute, TOKEN_HEADER};
pub use routes::{create_router, AppState};
