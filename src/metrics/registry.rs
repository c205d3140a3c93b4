// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // RELAY METRICS
    // ============================================================================

    /// Relayed requests by provider and upstream status
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("relay_requests_total", "Total relayed provider requests"),
        &["provider", "status_code"], // status_code: upstream status, or "error"
        REGISTRY
    ).unwrap();

    /// Time until upstream response headers arrive
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("relay_upstream_duration_seconds", "Time to upstream response headers")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["provider"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // ACCESS METRICS
    // ============================================================================

    /// Requests rejected by the access middleware
    pub static ref ACCESS_REJECTIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("relay_access_rejections_total", "Requests rejected before forwarding"),
        &["reason"], // reason: access_code, missing_token, unknown_route
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
