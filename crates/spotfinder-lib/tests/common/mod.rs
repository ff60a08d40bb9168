//! Shared fixtures for store integration tests.
//!
//! Seeds a temporary SQLite database with a handful of spots around central
//! Berlin plus two far-away ones.

use geo::Point;
use spotfinder_lib::{NewSpot, SqliteStore, TableName};
use tempfile::TempDir;

/// Centre used by most tests (Berlin Mitte).
#[allow(dead_code)]
pub const BERLIN: (f64, f64) = (13.405, 52.52);

#[allow(dead_code)]
pub fn berlin() -> Point<f64> {
    Point::new(BERLIN.0, BERLIN.1)
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

pub fn fixture_spots() -> Vec<NewSpot> {
    vec![
        spot("tower", 13.4094, 52.5208, 4.8, Some("https://tv-turm.de"), Some("Tall")),
        spot("alex", 13.4132, 52.5219, 3.9, None, None),
        spot("museum", 13.3976, 52.5169, 4.6, Some(""), Some("Island of museums")),
        spot("twin-low", 13.41, 52.53, 3.0, None, Some("Same place, lower rating")),
        spot("twin-high", 13.41, 52.53, 4.5, None, Some("Same place, higher rating")),
        spot("gate", 13.3777, 52.5163, 4.9, Some("https://example.org/gate"), None),
        spot("potsdam", 13.0645, 52.3906, 4.1, None, None),
        spot("paris", 2.3522, 48.8566, 4.7, None, None),
    ]
}

/// A SQLite store seeded with [`fixture_spots`]. Keep the `TempDir` alive
/// for as long as the store is used.
#[allow(dead_code)]
pub fn seeded_store() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = SqliteStore::new(dir.path().join("spots.db"), TableName::default());
    store.initialize().expect("schema created");
    store.insert(&fixture_spots()).expect("fixture spots inserted");
    (dir, store)
}
