// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{gather_metrics, ACCESS_REJECTIONS, REQUESTS_TOTAL, UPSTREAM_DURATION};

/// Helper to record a completed upstream call
pub fn record_upstream_call(provider: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[provider, &status_code.to_string()])
        .inc();

    UPSTREAM_DURATION
        .with_label_values(&[provider])
        .observe(duration_secs);
}

/// Helper to record a transport failure before any upstream status was seen
pub fn record_upstream_failure(provider: &str) {
    REQUESTS_TOTAL.with_label_values(&[provider, "error"]).inc();
}

/// Helper to record a request rejected by the access middleware
pub fn record_access_rejection(reason: &str) {
    ACCESS_REJECTIONS.with_label_values(&[reason]).inc();
}
