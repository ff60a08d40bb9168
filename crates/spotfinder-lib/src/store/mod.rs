//! Spatial store backends.
//!
//! A [`SpotStore`] executes an [`AreaQuery`] and returns rows already
//! filtered and ordered by the database. Two backends exist:
//!
//! - [`PostgisStore`]: Postgres with PostGIS, the production store.
//! - [`SqliteStore`]: a single SQLite file with longitude/latitude columns and
//!   a registered `geodesic_distance` SQL function, used for local runs and
//!   fixtures.
//!
//! Every query binds coordinates and radii as parameters. The only text
//! spliced into SQL is the table name, which is validated by [`TableName`].

mod postgis;
mod sqlite;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::area::AreaQuery;
use crate::error::{Error, Result};
use crate::spot::Spot;

pub use postgis::PostgisStore;
pub use sqlite::{NewSpot, SqliteStore};

/// Table used when none is configured.
pub const DEFAULT_TABLE: &str = "spots";

/// Read-only access to a table of spots.
#[async_trait]
pub trait SpotStore: Send + Sync {
    /// Run one area search. Either every matching row is returned, in the
    /// order the query defines, or an error.
    async fn spots_in_area(&self, query: &AreaQuery) -> Result<Vec<Spot>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Short backend label for logs and health output.
    fn backend(&self) -> &'static str;
}

/// A validated SQL table identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid_start && valid_rest {
            Ok(Self(name))
        } else {
            Err(Error::InvalidTableName { name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for use in SQL text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connection settings for [`connect_store`].
#[derive(Clone)]
pub struct StoreConfig {
    /// `postgres://...`, `postgresql://...`, `sqlite://<path>` or
    /// `sqlite:<path>`.
    pub database_url: String,
    pub table: TableName,
    /// Upper bound on pooled Postgres connections.
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            table: TableName::default(),
            max_connections: 5,
        }
    }

    pub fn with_table(mut self, table: TableName) -> Self {
        self.table = table;
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("database_url", &redact_url(&self.database_url))
            .field("table", &self.table)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Strip the password from a URL before it reaches a log line.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}

/// Open the backend named by the URL scheme.
///
/// Postgres pools connect lazily, so an unreachable server only surfaces on
/// the first query or readiness probe.
pub fn connect_store(config: &StoreConfig) -> Result<Arc<dyn SpotStore>> {
    let url = config.database_url.as_str();

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        info!(url = %redact_url(url), table = %config.table, "using postgis store");
        let store = PostgisStore::connect_lazy(url, config.table.clone(), config.max_connections)?;
        return Ok(Arc::new(store));
    }

    if let Some(path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    {
        info!(path = %path, table = %config.table, "using sqlite store");
        return Ok(Arc::new(SqliteStore::new(path, config.table.clone())));
    }

    Err(Error::UnsupportedDatabaseUrl {
        url: redact_url(url),
    })
}
