use thiserror::Error;

/// Convenient result alias for the Spotfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while talking to a spatial store.
///
/// Parameter validation has its own error type ([`crate::ParamError`]); every
/// variant here is a store-side failure and maps to an internal error at the
/// HTTP boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured database URL does not name a supported backend.
    #[error("unsupported database url scheme in {url}; expected postgres:// or sqlite://")]
    UnsupportedDatabaseUrl { url: String },

    /// The configured table name is not a plain SQL identifier.
    #[error("invalid table name {name:?}; expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidTableName { name: String },

    /// A row came back from the store that violates the spot contract.
    #[error("invalid spot row {id}: {message}")]
    InvalidRow { id: String, message: String },

    /// A blocking store task panicked or was cancelled.
    #[error("store task failed: {message}")]
    TaskFailed { message: String },

    /// Wrapper for Postgres/PostGIS errors.
    #[error(transparent)]
    Postgres(#[from] sqlx::Error),

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed {
            message: err.to_string(),
        }
    }
}
