//! Metrics collection and exposition.
//!
//! # Metrics
//! - `slash_commands_total` (counter): commands served, by outcome
//! - `slash_command_duration_seconds` (histogram): time to the inline response
//! - `slash_delayed_replies_total` (counter): delayed reply posts, by outcome
//!
//! # Design Decisions
//! - Outcome labels come from `SlashError::kind`, never from user input,
//!   to keep label cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one served command.
pub fn record_command(outcome: &'static str, start: Instant) {
    metrics::counter!("slash_commands_total", "outcome" => outcome).increment(1);
    metrics::histogram!("slash_command_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one delayed reply attempt.
pub fn record_delayed_reply(outcome: &'static str) {
    metrics::counter!("slash_delayed_replies_total", "outcome" => outcome).increment(1);
}
