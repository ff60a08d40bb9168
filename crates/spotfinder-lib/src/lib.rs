//! Spotfinder library entry points.
//!
//! This crate validates nearby-spot search parameters, turns them into a
//! circle or square [`AreaQuery`], and runs that query against a spatial
//! store (PostGIS or SQLite). HTTP services should only depend on the items
//! exported here instead of reimplementing geometry or SQL.
//!

#![deny(warnings)]

pub mod area;
pub mod error;
pub mod geometry;
pub mod params;
pub mod search;
pub mod spot;
pub mod store;

pub use area::AreaQuery;
pub use error::{Error, Result};
pub use geometry::{geodesic_distance, point_wkt, SquareBounds, EARTH_RADIUS_KM};
pub use params::{ParamError, RawSearchParams, SearchParams, SearchShape};
pub use search::find_spots;
pub use spot::{Spot, SpotsResponse};
pub use store::{
    connect_store, NewSpot, PostgisStore, SpotStore, SqliteStore, StoreConfig, TableName,
};
