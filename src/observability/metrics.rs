//! Metrics collection and exposition.
//!
//! # Metrics
//! - `adskip_detect_requests_total` (counter): detect requests by outcome
//! - `adskip_detect_duration_seconds` (histogram): detect handler latency
//! - `adskip_rate_limited_total` (counter): rejections by scope
//! - `adskip_result_lookups_total` (counter): result lookups by hit/miss
//! - `adskip_results_stored` (gauge): distinct video ids with a result
//!
//! # Design Decisions
//! - Low-overhead updates (atomic operations in the metrics registry)
//! - Exporter is opt-in; recorder calls are no-ops when disabled

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record the outcome and latency of one detect request.
pub fn record_detect(outcome: &'static str, start: Instant) {
    counter!("adskip_detect_requests_total", "outcome" => outcome).increment(1);
    histogram!("adskip_detect_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a rate-limit rejection under the given scope.
pub fn record_rate_limited(scope: &'static str) {
    counter!("adskip_rate_limited_total", "scope" => scope).increment(1);
}

/// Record a result lookup.
pub fn record_result_lookup(hit: bool) {
    let label = if hit { "hit" } else { "miss" };
    counter!("adskip_result_lookups_total", "result" => label).increment(1);
}

/// Track how many results are currently stored.
pub fn record_store_size(count: usize) {
    gauge!("adskip_results_stored").set(count as f64);
}
