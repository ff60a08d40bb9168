use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::debug;

use super::{SpotStore, TableName};
use crate::area::AreaQuery;
use crate::error::Result;
use crate::spot::Spot;

/// PostGIS-backed store.
///
/// Expects a table with columns `id`, `name`, `website`, `coordinates`
/// (a SRID 4326 point geometry), `description` and `rating`.
#[derive(Debug, Clone)]
pub struct PostgisStore {
    pool: PgPool,
    table: TableName,
}

#[derive(Debug, FromRow)]
struct SpotRow {
    id: String,
    name: String,
    website: Option<String>,
    coordinates: String,
    description: Option<String>,
    rating: f64,
    distance: Option<f64>,
}

impl From<SpotRow> for Spot {
    fn from(row: SpotRow) -> Self {
        Spot {
            id: row.id,
            name: row.name,
            website: row.website,
            coordinates: row.coordinates,
            description: row.description,
            rating: row.rating,
            distance: row.distance,
        }
    }
}

impl PostgisStore {
    /// Build a pool without opening a connection. Must run inside a Tokio
    /// runtime.
    pub fn connect_lazy(url: &str, table: TableName, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(url)?;
        Ok(Self { pool, table })
    }

    pub fn from_pool(pool: PgPool, table: TableName) -> Self {
        Self { pool, table }
    }

    /// `$1` = centre longitude, `$2` = centre latitude, `$3` = radius in
    /// metres.
    pub(crate) fn circle_sql(table: &TableName) -> String {
        format!(
            r#"
            SELECT
                id::text AS id, name, website, ST_AsText(coordinates) AS coordinates,
                description, rating::float8 AS rating,
                ST_Distance(coordinates::geography, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography) AS distance
            FROM
                {table}
            WHERE
                ST_DWithin(coordinates::geography, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3)
            ORDER BY
                distance, rating DESC
            "#,
            table = table.quoted()
        )
    }

    /// `$1`/`$2` = longitude bounds, `$3`/`$4` = latitude bounds,
    /// `$5`/`$6` = centre longitude/latitude for ordering.
    pub(crate) fn square_sql(table: &TableName) -> String {
        format!(
            r#"
            SELECT
                id::text AS id, name, website, ST_AsText(coordinates) AS coordinates,
                description, rating::float8 AS rating,
                NULL::float8 AS distance
            FROM
                {table}
            WHERE
                ST_X(coordinates::geometry) >= $1 AND ST_X(coordinates::geometry) <= $2 AND
                ST_Y(coordinates::geometry) >= $3 AND ST_Y(coordinates::geometry) <= $4
            ORDER BY
                ST_Distance(coordinates::geography, ST_SetSRID(ST_MakePoint($5, $6), 4326)::geography)
            "#,
            table = table.quoted()
        )
    }
}

#[async_trait]
impl SpotStore for PostgisStore {
    async fn spots_in_area(&self, query: &AreaQuery) -> Result<Vec<Spot>> {
        let rows: Vec<SpotRow> = match query {
            AreaQuery::Circle { center, radius_m } => {
                let sql = Self::circle_sql(&self.table);
                debug!(table = %self.table, "running postgis circle query");
                sqlx::query_as::<_, SpotRow>(&sql)
                    .bind(center.x())
                    .bind(center.y())
                    .bind(*radius_m)
                    .fetch_all(&self.pool)
                    .await?
            }
            AreaQuery::Square { center, bounds } => {
                let sql = Self::square_sql(&self.table);
                debug!(table = %self.table, "running postgis square query");
                sqlx::query_as::<_, SpotRow>(&sql)
                    .bind(bounds.min_lon)
                    .bind(bounds.max_lon)
                    .bind(bounds.min_lat)
                    .bind(bounds.max_lat)
                    .bind(center.x())
                    .bind(center.y())
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(|row| Spot::from(row).checked()).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgis"
    }
}
