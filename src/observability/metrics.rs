//! Metrics collection and exposition.
//!
//! # Metrics
//! - `temperature_requests_total` (counter): requests by role and status
//! - `temperature_request_duration_seconds` (histogram): handler latency
//! - `temperature_hop_duration_seconds` (histogram): latency per hop and outcome
//!
//! Recording goes through the `metrics` facade, so calls are no-ops until
//! `init_metrics` installs the Prometheus recorder.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::lookup::Hop;

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(role: &'static str, status: u16, start: Instant) {
    counter!(
        "temperature_requests_total",
        "role" => role,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("temperature_request_duration_seconds", "role" => role)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_hop(hop: Hop, outcome: &'static str, elapsed: Duration) {
    histogram!(
        "temperature_hop_duration_seconds",
        "hop" => hop.as_str(),
        "outcome" => outcome
    )
    .record(elapsed.as_secs_f64());
}
