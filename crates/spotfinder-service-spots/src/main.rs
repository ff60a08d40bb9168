//! Spotfinder nearby-spots HTTP microservice.
//!
//! # Configuration
//!
//! - `SPOTS_DATABASE_URL` - `postgres://...` or `sqlite:<path>` (required)
//! - `SPOTS_TABLE` - Table holding the spots (default: spots)
//! - `SERVICE_HOST` / `SERVICE_PORT` - Listen address (default: 127.0.0.1:8000)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint (default: on, /metrics)

use tracing::{error, info};

use spotfinder_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};
use spotfinder_service_spots::router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("spots");
    init_logging(&logging_config)?;

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional; keep serving without them.
        tracing::warn!(error = %e, "metrics not initialized, continuing without metrics");
    }

    let config = ServiceConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        e
    })?;

    let addr = config.bind_addr();
    info!(addr = %addr, store = ?config.store, "starting spots service");

    let service = logging_config
        .service
        .clone()
        .unwrap_or_else(|| "spots".to_string());
    let state = AppState::connect(&config.store)
        .map_err(|e| {
            error!(error = %e, "failed to configure application state");
            e
        })?
        .with_service(service);

    let app = router(state, &metrics_config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("spots service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
