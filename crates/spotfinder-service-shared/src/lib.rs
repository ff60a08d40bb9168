//! Shared infrastructure for Spotfinder HTTP microservices.
//!
//! This crate provides the HTTP glue around `spotfinder-lib`:
//!
//! - [`AppState`]: Shared handle to the configured spatial store
//! - [`ServiceConfig`]: Process configuration read from the environment
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ApiError`]: Plain-text error responses (400 / 500 / 503)
//! - [`ServiceResponse`]: JSON success responses with explicit serialization
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - [`SpotsQuery`]: Query-string type for `GET /spots` with validation
//!
//! # Architecture
//!
//! Handlers stay thin; validation, geometry and SQL live in `spotfinder-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract query string                                     │
//! │  - Validate parameters (400 on failure)                     │
//! │  - Call spotfinder-lib find_spots (500 on store failure)    │
//! │  - Serialize {"spots": [...]}                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a seeded SQLite fixture state and an
//! unavailable-store state for handler testing. Enable the `test-utils`
//! feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod error;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, MSG_INVALID_QUERY, MSG_SERIALIZATION_FAILURE, MSG_STORE_FAILURE};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_search_completed, record_search_failed, MetricsConfig,
    MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use request::{SpotsQuery, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError, DEFAULT_SERVICE_NAME};
