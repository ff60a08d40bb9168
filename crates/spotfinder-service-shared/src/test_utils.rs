//! Test utilities for handler testing.
//!
//! Builds [`AppState`] values backed by a throwaway SQLite database seeded
//! with a few spots around Berlin Mitte, or by a store that cannot be
//! reached at all.

use std::sync::Arc;

use spotfinder_lib::{NewSpot, SqliteStore, TableName};
use tempfile::TempDir;

use crate::state::AppState;

/// Known fixture spots and the point they are clustered around.
pub mod fixture_spots {
    /// Berlin Mitte as `(longitude, latitude)`.
    pub const BERLIN: (f64, f64) = (13.405, 52.52);

    /// Fernsehturm, about 310 m from [`BERLIN`].
    pub const TOWER: &str = "tower";
    /// About 600 m away, no website or description.
    pub const ALEX: &str = "alex";
    /// About 610 m away, empty-string website.
    pub const MUSEUM: &str = "museum";
    /// About 1.9 km away.
    pub const GATE: &str = "gate";
    /// Far outside any small search area.
    pub const PARIS: &str = "paris";
}

fn spot(
    id: &str,
    longitude: f64,
    latitude: f64,
    rating: f64,
    website: Option<&str>,
    description: Option<&str>,
) -> NewSpot {
    NewSpot {
        id: id.to_string(),
        name: format!("Spot {id}"),
        website: website.map(str::to_string),
        longitude,
        latitude,
        description: description.map(str::to_string),
        rating,
    }
}

/// Rows seeded into [`fixture_state`].
pub fn fixture_rows() -> Vec<NewSpot> {
    vec![
        spot("tower", 13.4094, 52.5208, 4.8, Some("https://tv-turm.de"), Some("Tall")),
        spot("alex", 13.4132, 52.5219, 3.9, None, None),
        spot("museum", 13.3976, 52.5169, 4.6, Some(""), Some("Island of museums")),
        spot("gate", 13.3777, 52.5163, 4.9, Some("https://example.org/gate"), None),
        spot("paris", 2.3522, 48.8566, 4.7, None, None),
    ]
}

/// State over a freshly seeded SQLite store.
///
/// Keep the returned `TempDir` alive while the state is in use.
///
/// # Panics
///
/// Panics if the temporary database cannot be created or seeded.
pub fn fixture_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("temp dir for fixture store");
    let store = SqliteStore::new(dir.path().join("spots.db"), TableName::default());
    store.initialize().expect("fixture schema created");
    store
        .insert(&fixture_rows())
        .expect("fixture spots inserted");
    (dir, AppState::from_store(Arc::new(store)))
}

/// State over a store whose database file does not exist, so every query
/// and ping fails.
pub fn unavailable_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("temp dir for unavailable store");
    let store = SqliteStore::new(dir.path().join("missing.db"), TableName::default());
    (dir, AppState::from_store(Arc::new(store)))
}
