//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_errors_suppressed_total` (counter): upstream responses
//!   replaced by a redirect, by intercepted status code

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const SUPPRESSED_TOTAL: &str = "redirect_errors_suppressed_total";

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    metrics::describe_counter!(
        SUPPRESSED_TOTAL,
        "Upstream responses replaced by an error redirect"
    );
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}
