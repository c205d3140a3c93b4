// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::middleware::ResolvedRoute;
use super::routes::AppState;
use crate::error::ProxyError;
use crate::provider::Provider;
use axum::{
    extract::{Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Public client configuration. Must never carry secrets.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfigResponse {
    pub need_code: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Handler for /api/config
pub async fn config_handler(State(state): State<AppState>) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse {
        need_code: state.config.need_code(),
    })
}

/// Handler for every provider pass-through route.
///
/// The provider and credential were resolved by the access middleware.
pub async fn relay_handler(
    State(state): State<AppState>,
    mut req: Request,
) -> Result<Response, ProxyError> {
    let route = req
        .extensions_mut()
        .remove::<ResolvedRoute>()
        .ok_or_else(|| ProxyError::Internal("Relay route reached without access gate".to_string()))?;

    state.forwarder.forward(route.provider, &route.token, req).await
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    // Only report whether a credential exists, never its value or the upstream URL
    let mut configured = 0;
    for provider in Provider::ALL {
        let check = if state.config.endpoint(provider).credential.is_some() {
            configured += 1;
            HealthCheck {
                status: "ok".to_string(),
                message: "Credential configured".to_string(),
            }
        } else {
            HealthCheck {
                status: "warning".to_string(),
                message: "No credential configured".to_string(),
            }
        };
        checks.insert(provider.name().to_string(), check);
    }

    let status = match configured {
        0 => HealthStatus::Unhealthy,
        n if n == Provider::ALL.len() => HealthStatus::Healthy,
        _ => HealthStatus::Degraded,
    };

    Json(HealthResponse {
        status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for /metrics (Prometheus text exposition)
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
