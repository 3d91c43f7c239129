//! Prometheus metrics for application observability.
//!
//! Metrics are exposed via a dedicated HTTP listener (default port 9090).
//! When no exporter is installed the recording functions are no-ops, so
//! tests and embedded routers never need to initialise anything.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `coffee_operations_total` - Coffee operations (labels: operation, outcome)
//!
//! ## Histograms
//! - `coffee_store_duration_seconds` - Time spent in the store (label: operation)
//!
//! ## Gauges
//! - `coffee_records` - Records currently stored

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

/// Metric names as constants for consistency.
pub mod names {
    pub const OPERATIONS_TOTAL: &str = "coffee_operations_total";
    pub const STORE_DURATION_SECONDS: &str = "coffee_store_duration_seconds";
    pub const RECORDS: &str = "coffee_records";
}

/// Install the Prometheus exporter and describe all metrics.
///
/// # Errors
///
/// Returns a message if the exporter cannot be installed (e.g. the port is
/// taken or a recorder is already set).
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(
        names::OPERATIONS_TOTAL,
        "Total number of coffee operations by outcome"
    );
    describe_histogram!(
        names::STORE_DURATION_SECONDS,
        "Coffee store operation duration in seconds"
    );
    describe_gauge!(names::RECORDS, "Number of coffee records currently stored");

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Record one coffee operation.
///
/// `outcome` is one of `ok`, `created`, `updated`, `not_found` or `error`.
pub fn record_operation(operation: &'static str, outcome: &'static str, duration_secs: f64) {
    counter!(names::OPERATIONS_TOTAL, "operation" => operation, "outcome" => outcome).increment(1);
    histogram!(names::STORE_DURATION_SECONDS, "operation" => operation).record(duration_secs);
}

/// Update the stored-record gauge.
pub fn set_record_count(count: usize) {
    gauge!(names::RECORDS).set(count as f64);
}
