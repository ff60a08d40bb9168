//! Prometheus metrics for the spots service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Whether metrics are exposed, and where
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler rendering the exposition text
//! - Search metric helpers used by the `/spots` handler
//!
//! # Example
//!
//! ```no_run
//! use spotfinder_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route(&config.path, get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the exposition text, e.g. "/metrics".
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: anything but "false" enables metrics (default: true)
    /// - `METRICS_PATH`: path for the endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let path = lookup("METRICS_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder.
///
/// Call once at startup before any metric is recorded. Metrics recorded
/// before installation (or when disabled) go to the no-op recorder.
///
/// # Errors
///
/// - [`MetricsError::Disabled`] when `config.enabled` is false
/// - [`MetricsError::AlreadyInitialized`] on a second call
/// - [`MetricsError::InstallFailed`] when the builder rejects installation
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
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// The installed Prometheus handle, if [`init_metrics`] succeeded.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the metrics endpoint.
pub async fn metrics_handler() -> String {
    prometheus_handle()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Search metrics
// =============================================================================

/// Record a completed search.
///
/// Increments `spotfinder_searches_total{shape}` and records the result
/// size in the `spotfinder_spots_returned{shape}` histogram.
pub fn record_search_completed(shape: &str, count: usize) {
    metrics::counter!(
        "spotfinder_searches_total",
        "shape" => shape.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "spotfinder_spots_returned",
        "shape" => shape.to_string()
    )
    .record(count as f64);
}

/// Record a rejected or failed search.
///
/// `reason` is one of `invalid_query`, `validation_error`, `store_error`.
pub fn record_search_failed(reason: &str) {
    metrics::counter!(
        "spotfinder_searches_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}
