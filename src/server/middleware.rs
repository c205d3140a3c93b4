// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::access::ACCESS_CODE_HEADER;
use crate::error::ProxyError;
use crate::provider::{Provider, Secret};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{info, warn};

/// Legacy header that once carried the injected credential. Stripped from
/// inbound requests so clients cannot smuggle their own.
pub const TOKEN_HEADER: &str = "token";

/// Provider and credential chosen by [`access_gate`].
///
/// Lives only in request extensions; it is never serialized or echoed.
#[derive(Clone, Debug)]
pub struct ResolvedRoute {
    pub provider: Provider,
    pub token: Secret,
}

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// Best-effort caller address: `x-real-ip`, then the first `x-forwarded-for`
/// entry, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-real-ip")
        .or_else(|| header("x-forwarded-for").and_then(|v| v.split(',').next()).map(str::trim))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Gate for every provider route.
///
/// Checks the access code (when codes are configured), resolves the provider
/// from the request path, and attaches its credential as a [`ResolvedRoute`]
/// extension. Rejected requests never reach the forwarder.
pub async fn access_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ProxyError> {
    let path = req.uri().path().to_string();
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(req.headers(), peer).unwrap_or_else(|| "unknown".to_string());

    info!(
        time = %chrono::Local::now().to_rfc3339(),
        ip = %ip,
        path = %path,
        "Relay request received"
    );

    if state.config.need_code() {
        let code = req
            .headers()
            .get(ACCESS_CODE_HEADER)
            .map(|v| v.as_bytes());

        if !state.config.access_codes().verify(code) {
            warn!(ip = %ip, code_present = code.is_some(), "Rejected request: access code mismatch");
            crate::metrics::record_access_rejection("access_code");
            return Err(ProxyError::AccessDenied);
        }
    }

    let provider = Provider::from_path(&path).ok_or_else(|| {
        warn!(path = %path, "No provider route for path");
        crate::metrics::record_access_rejection("unknown_route");
        ProxyError::UnknownRoute(path.clone())
    })?;

    let token = state
        .config
        .endpoint(provider)
        .credential
        .clone()
        .ok_or_else(|| {
            warn!(provider = %provider, "No server-side credential configured");
            crate::metrics::record_access_rejection("missing_token");
            ProxyError::MissingToken(provider)
        })?;

    info!(provider = %provider, "Set system token");

    req.headers_mut().remove(TOKEN_HEADER);
    req.extensions_mut().insert(ResolvedRoute { provider, token });

    Ok(next.run(req).await)
}
