//! Prometheus metrics for the fuel optimizer service.
//!
//! - [`MetricsConfig`]: whether metrics are enabled
//! - [`init_metrics`]: install the Prometheus recorder
//! - [`metrics_handler`]: `/metrics` endpoint
//! - Business counters for estimates, optimizations and failed routes
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use fuelopt_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED`: anything but "false" enables metrics (default: true).
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        Self { enabled }
    }
}

#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the Prometheus recorder. Must run once, before anything is recorded.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Prometheus exposition text, or a comment line if metrics were never initialized.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// `fuelopt_estimates_total{aircraft}`
pub fn record_estimate(aircraft: &str) {
    metrics::counter!("fuelopt_estimates_total", "aircraft" => aircraft.to_string()).increment(1);
}

/// `fuelopt_optimizations_total{aircraft}` and the `fuelopt_optimize_candidates`
/// histogram.
pub fn record_optimization(aircraft: &str, candidates: usize) {
    metrics::counter!("fuelopt_optimizations_total", "aircraft" => aircraft.to_string())
        .increment(1);
    metrics::histogram!("fuelopt_optimize_candidates").record(candidates as f64);
}

/// `fuelopt_route_failures_total`, incremented once per failed candidate.
pub fn record_route_failures(count: usize) {
    if count > 0 {
        metrics::counter!("fuelopt_route_failures_total").increment(count as u64);
    }
}

/// `fuelopt_requests_failed_total{reason}` for requests answered with Problem Details.
pub fn record_request_failed(reason: &str) {
    metrics::counter!("fuelopt_requests_failed_total", "reason" => reason.to_string())
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        assert!(MetricsConfig::default().enabled);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let err = init_metrics(&MetricsConfig { enabled: false }).unwrap_err();
        assert!(matches!(err, MetricsError::Disabled));
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_text() {
        let output = metrics_handler().await;
        assert!(output.contains('#') || output.is_empty());
    }

    // Without a recorder installed these are no-ops; they must not panic.
    #[test]
    fn test_business_metrics_record() {
        record_estimate("A320");
        record_optimization("A320", 3);
        record_route_failures(0);
        record_route_failures(2);
        record_request_failed("aircraft_not_found");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
