// aigc-relay - Access-code gated relay for OpenAI, HuggingFace and Stable Diffusion
// Author: kelexine (https://github.com/kelexine)

use aigc_relay::cli::Args;
use aigc_relay::config::{AppConfig, ServerConfig};
use aigc_relay::forward::Forwarder;
use aigc_relay::provider::Provider;
use aigc_relay::server::create_router;
use aigc_relay::utils::logging;
use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load relay configuration, CLI flags win
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.listen.host = host;
    }
    if let Some(port) = args.port {
        config.listen.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting aigc-relay v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Resolve provider environment once; it is immutable from here on
    let server_config = Arc::new(ServerConfig::from_env()?);
    info!(
        need_code = server_config.need_code(),
        codes = server_config.access_codes().len(),
        vercel = server_config.is_vercel(),
        "Server configuration resolved"
    );
    for provider in Provider::ALL {
        let endpoint = server_config.endpoint(provider);
        if endpoint.credential.is_none() {
            warn!(provider = %provider, base = %endpoint.base_url, "No credential configured, requests will be rejected");
        } else {
            info!(provider = %provider, base = %endpoint.base_url, "Provider configured");
        }
    }

    // Phase 4: Build the upstream client and router
    let forwarder = Forwarder::new(server_config.clone(), &config.forwarding)?;
    let app = create_router(server_config, forwarder)?;
    let addr: SocketAddr = format!("{}:{}", config.listen.host, config.listen.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
