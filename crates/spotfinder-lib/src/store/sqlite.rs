use std::path::{Path, PathBuf};

use async_trait::async_trait;
use geo::Point;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OpenFlags, Row};
use tracing::debug;

use super::{SpotStore, TableName};
use crate::area::AreaQuery;
use crate::error::Result;
use crate::geometry::{geodesic_distance, point_wkt};
use crate::spot::Spot;

/// Name of the scalar SQL function registered on every connection.
pub const GEODESIC_DISTANCE_FN: &str = "geodesic_distance";

/// SQLite-backed store.
///
/// Coordinates live in plain `longitude`/`latitude` REAL columns and WKT is
/// rendered on the way out. A new connection is opened for every request on
/// the blocking thread pool, so the store itself holds no connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    table: TableName,
}

/// A spot to insert when seeding a SQLite database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpot {
    pub id: String,
    pub name: String,
    pub website: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub description: Option<String>,
    pub rating: f64,
}

impl SqliteStore {
    pub fn new(path: impl AsRef<Path>, table: TableName) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table,
        }
    }

    /// Create the spots table if it does not exist.
    pub fn initialize(&self) -> Result<()> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                website TEXT,
                longitude REAL NOT NULL,
                latitude REAL NOT NULL,
                description TEXT,
                rating REAL NOT NULL
            );",
            table = self.table.quoted()
        ))?;
        Ok(())
    }

    /// Insert spots in a single transaction. Returns the number inserted.
    pub fn insert(&self, spots: &[NewSpot]) -> Result<usize> {
        let mut conn = Connection::open(&self.path)?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} (id, name, website, longitude, latitude, description, rating)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                table = self.table.quoted()
            ))?;
            for spot in spots {
                stmt.execute(params![
                    spot.id,
                    spot.name,
                    spot.website,
                    spot.longitude,
                    spot.latitude,
                    spot.description,
                    spot.rating,
                ])?;
            }
        }
        tx.commit()?;
        debug!(count = spots.len(), path = %self.path.display(), "inserted spots");
        Ok(spots.len())
    }

    fn open_read_only(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        register_geodesic_distance(&conn)?;
        Ok(conn)
    }

    /// `?1`/`?2` = centre longitude/latitude, `?3` = radius in metres.
    fn circle_sql(&self) -> String {
        format!(
            "SELECT id, name, website, longitude, latitude, description, rating, distance
             FROM (
                 SELECT id, name, website, longitude, latitude, description, rating,
                        {func}(longitude, latitude, ?1, ?2) AS distance
                 FROM {table}
             )
             WHERE distance <= ?3
             ORDER BY distance, rating DESC",
            func = GEODESIC_DISTANCE_FN,
            table = self.table.quoted()
        )
    }

    /// `?1`/`?2` = longitude bounds, `?3`/`?4` = latitude bounds,
    /// `?5`/`?6` = centre longitude/latitude for ordering.
    fn square_sql(&self) -> String {
        format!(
            "SELECT id, name, website, longitude, latitude, description, rating, NULL AS distance
             FROM {table}
             WHERE longitude >= ?1 AND longitude <= ?2
               AND latitude >= ?3 AND latitude <= ?4
             ORDER BY {func}(longitude, latitude, ?5, ?6)",
            func = GEODESIC_DISTANCE_FN,
            table = self.table.quoted()
        )
    }

    fn query_blocking(&self, query: &AreaQuery) -> Result<Vec<Spot>> {
        let conn = self.open_read_only()?;

        let spots = match query {
            AreaQuery::Circle { center, radius_m } => {
                let mut stmt = conn.prepare(&self.circle_sql())?;
                let rows = stmt.query_map(params![center.x(), center.y(), radius_m], map_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            AreaQuery::Square { center, bounds } => {
                let mut stmt = conn.prepare(&self.square_sql())?;
                let rows = stmt.query_map(
                    params![
                        bounds.min_lon,
                        bounds.max_lon,
                        bounds.min_lat,
                        bounds.max_lat,
                        center.x(),
                        center.y(),
                    ],
                    map_row,
                )?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        spots.into_iter().map(Spot::checked).collect()
    }

    fn ping_blocking(&self) -> Result<()> {
        let conn = self.open_read_only()?;
        conn.prepare(&format!("SELECT 1 FROM {} LIMIT 1", self.table.quoted()))?
            .exists([])?;
        Ok(())
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Spot> {
    let longitude: f64 = row.get(3)?;
    let latitude: f64 = row.get(4)?;
    Ok(Spot {
        id: row.get(0)?,
        name: row.get(1)?,
        website: row.get(2)?,
        coordinates: point_wkt(Point::new(longitude, latitude)),
        description: row.get(5)?,
        rating: row.get(6)?,
        distance: row.get(7)?,
    })
}

/// Register `geodesic_distance(lon1, lat1, lon2, lat2)` returning metres.
fn register_geodesic_distance(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        GEODESIC_DISTANCE_FN,
        4,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let a = Point::new(ctx.get::<f64>(0)?, ctx.get::<f64>(1)?);
            let b = Point::new(ctx.get::<f64>(2)?, ctx.get::<f64>(3)?);
            Ok(geodesic_distance(a, b))
        },
    )
}

#[async_trait]
impl SpotStore for SqliteStore {
    async fn spots_in_area(&self, query: &AreaQuery) -> Result<Vec<Spot>> {
        let store = self.clone();
        let query = *query;
        tokio::task::spawn_blocking(move || store.query_blocking(&query)).await?
    }

    async fn ping(&self) -> Result<()> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.ping_blocking()).await?
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
