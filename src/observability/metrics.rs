//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method and status
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency
//!
//! Recording is a no-op until the exporter is installed, so the library can
//! be driven in tests without a metrics endpoint.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(error) => tracing::error!(error = %error, "failed to start metrics exporter"),
    }
}

/// Record one completed (or failed) proxied request.
pub fn record_request(method: &str, status: u16, started: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "method" => method.to_string())
        .record(started.elapsed().as_secs_f64());
}
