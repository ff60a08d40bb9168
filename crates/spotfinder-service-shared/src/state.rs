//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the configured spatial store.

use std::sync::Arc;

use spotfinder_lib::{connect_store, Error as LibError, SpotStore, StoreConfig};

/// Service name reported by the health probes until one is set.
pub const DEFAULT_SERVICE_NAME: &str = "spotfinder";

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The store could not be configured (bad URL, bad table, pool error).
    Store(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(e) => write!(f, "failed to configure spot store: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::Store(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. Handlers hold no other shared state.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use spotfinder_lib::StoreConfig;
/// use spotfinder_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let store = state.store();
///     // ... query the store
/// }
///
/// let state = AppState::connect(&StoreConfig::new("sqlite:spots.db")).unwrap();
/// let app = Router::new()
///     .route("/spots", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn SpotStore>,
    service: String,
}

impl AppState {
    /// Configure the store named by `config.database_url`.
    ///
    /// Postgres connects lazily, so this succeeds even if the database is
    /// down; the readiness probe reports that case.
    pub fn connect(config: &StoreConfig) -> Result<Self, AppStateError> {
        tracing::info!(store = ?config, "configuring spot store");
        let store = connect_store(config)?;
        tracing::info!(backend = store.backend(), "spot store configured");
        Ok(Self::from_store(store))
    }

    /// Create application state from an existing store.
    ///
    /// This is useful for testing or when the store is built elsewhere.
    pub fn from_store(store: Arc<dyn SpotStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                service: DEFAULT_SERVICE_NAME.to_string(),
            }),
        }
    }

    /// Name the service in health responses, e.g. the value passed to
    /// `LoggingConfig::with_service`.
    pub fn with_service(self, service: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Arc::clone(&self.inner.store),
                service: service.into(),
            }),
        }
    }

    pub fn service(&self) -> &str {
        &self.inner.service
    }

    /// Access the configured store.
    pub fn store(&self) -> &dyn SpotStore {
        self.inner.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.inner.service)
            .field("backend", &self.inner.store.backend())
            .finish()
    }
}
