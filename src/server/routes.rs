// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{config_handler, health_handler, metrics_handler, relay_handler};
use super::middleware::{access_gate, request_id_layers};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::forward::Forwarder;
use crate::provider::ROUTES;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub forwarder: Arc<Forwarder>,
}

pub fn create_router(config: Arc<ServerConfig>, forwarder: Forwarder) -> Result<Router> {
    let state = AppState {
        config,
        forwarder: Arc::new(forwarder),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    // Provider pass-through routes, all behind the access gate
    let relay = ROUTES
        .iter()
        .fold(Router::new(), |router, (prefix, _)| {
            router.route(prefix, get(relay_handler).post(relay_handler))
        })
        .route_layer(middleware::from_fn_with_state(state.clone(), access_gate));

    let app = Router::new()
        .route("/api/config", get(config_handler).post(config_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .merge(relay)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
