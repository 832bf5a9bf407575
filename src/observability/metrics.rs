//! Metrics collection and exposition.
//!
//! # Metrics
//! - `desk_poll_attempts_total` (counter): failed lookups by phase
//! - `desk_confirmations_total` (counter): poll outcomes (confirmed, timed_out)
//! - `desk_confirmation_wait_seconds` (histogram): time from first lookup to outcome
//! - `desk_lcd_health` (gauge): 1=healthy, 0=unhealthy
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

use crate::resilience::backoff::PollPhase;

/// Start the Prometheus scrape endpoint on `addr`. Must run inside a tokio
/// runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a lookup that did not find the transaction.
pub fn record_poll_attempt(phase: PollPhase) {
    counter!("desk_poll_attempts_total", "phase" => phase.as_str()).increment(1);
}

/// Record how a poll ended and how long it took.
pub fn record_confirmation(outcome: &'static str, waited: Duration) {
    counter!("desk_confirmations_total", "outcome" => outcome).increment(1);
    histogram!("desk_confirmation_wait_seconds", "outcome" => outcome).record(waited.as_secs_f64());
}

/// Record LCD endpoint health.
pub fn record_lcd_health(endpoint: &str, healthy: bool) {
    gauge!("desk_lcd_health", "endpoint" => endpoint.to_string()).set(if healthy { 1.0 } else { 0.0 });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder() {
        record_poll_attempt(PollPhase::FastPoll);
        record_confirmation("confirmed", Duration::from_millis(1500));
        record_lcd_health("http://127.0.0.1:1317", false);
    }
}
