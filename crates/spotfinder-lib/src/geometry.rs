//! Geodesic helpers shared by every store backend.
//!
//! Points follow the `geo` convention: `x` is longitude and `y` is latitude,
//! both in degrees on WGS84.

use std::f64::consts::PI;

use geo::{Distance, Geodesic, Point};

/// Earth radius used by the square approximation.
///
/// This is kilometres while circle searches work in metres, so a square
/// search with `radius = 1` spans roughly one kilometre in each direction.
/// Callers rely on this behaviour; do not rescale.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geodesic distance in metres between two points on the WGS84 ellipsoid.
pub fn geodesic_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    Geodesic::distance(a, b)
}

/// Well-known-text rendering of a point, matching PostGIS `ST_AsText`.
pub fn point_wkt(point: Point<f64>) -> String {
    format!("POINT({} {})", point.x(), point.y())
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl SquareBounds {
    /// Bounding box approximating a square of half-width `radius` around
    /// `center`.
    ///
    /// The longitude half-width is widened by `1 / cos(lat)` for meridian
    /// convergence. Near the poles the divisor approaches zero and the box
    /// grows without bound; that is accepted as-is.
    pub fn around(center: Point<f64>, radius: f64) -> Self {
        let lat_boundary = 180.0 * radius / (PI * EARTH_RADIUS_KM);
        let lng_boundary = lat_boundary / (center.y() * PI / 180.0).cos();

        Self {
            min_lon: center.x() - lng_boundary,
            max_lon: center.x() + lng_boundary,
            min_lat: center.y() - lat_boundary,
            max_lat: center.y() + lat_boundary,
        }
    }

    /// Inclusive containment check.
    pub fn contains(&self, point: Point<f64>) -> bool {
        point.x() >= self.min_lon
            && point.x() <= self.max_lon
            && point.y() >= self.min_lat
            && point.y() <= self.max_lat
    }

    pub fn lat_half_width(&self) -> f64 {
        (self.max_lat - self.min_lat) / 2.0
    }

    pub fn lon_half_width(&self) -> f64 {
        (self.max_lon - self.min_lon) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn geodesic_distance_zero_for_same_point() {
        let p = Point::new(13.405, 52.52);
        assert!(geodesic_distance(p, p).abs() < EPS);
    }

    #[test]
    fn geodesic_distance_one_degree_latitude_at_equator() {
        // One degree of latitude at the equator on WGS84 is ~110.574 km.
        let d = geodesic_distance(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        assert!((d - 110_574.0).abs() < 5.0, "distance was {d}");
    }

    #[test]
    fn geodesic_distance_is_symmetric() {
        let a = Point::new(2.3522, 48.8566);
        let b = Point::new(13.405, 52.52);
        let ab = geodesic_distance(a, b);
        let ba = geodesic_distance(b, a);
        assert!((ab - ba).abs() < 1e-6);
        // Paris to Berlin is roughly 878 km.
        assert!((ab - 878_000.0).abs() < 5_000.0, "distance was {ab}");
    }

    #[test]
    fn square_bounds_at_equator() {
        let bounds = SquareBounds::around(Point::new(10.0, 0.0), 1.0);
        let expected = 180.0 / (PI * EARTH_RADIUS_KM);

        assert!((bounds.lat_half_width() - expected).abs() < EPS);
        // cos(0) == 1 so both half-widths match.
        assert!((bounds.lon_half_width() - expected).abs() < EPS);
        assert!((bounds.min_lon - (10.0 - expected)).abs() < EPS);
        assert!((bounds.max_lat - expected).abs() < EPS);
    }

    #[test]
    fn square_bounds_widen_longitude_with_latitude() {
        let bounds = SquareBounds::around(Point::new(0.0, 60.0), 10.0);
        // cos(60°) == 0.5
        assert!((bounds.lon_half_width() - 2.0 * bounds.lat_half_width()).abs() < 1e-9);
    }

    #[test]
    fn square_bounds_use_kilometre_earth_radius() {
        // 111.19 "units" of radius cover about one degree of latitude.
        let bounds = SquareBounds::around(Point::new(0.0, 0.0), 111.194_926_6);
        assert!((bounds.lat_half_width() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn square_bounds_near_pole_are_huge_but_finite() {
        let bounds = SquareBounds::around(Point::new(0.0, 90.0), 1.0);
        assert!(bounds.lon_half_width() > 1e10);
        assert!(bounds.lon_half_width().is_finite());
    }

    #[test]
    fn negative_radius_produces_empty_box() {
        let bounds = SquareBounds::around(Point::new(0.0, 0.0), -1.0);
        assert!(bounds.min_lat > bounds.max_lat);
        assert!(!bounds.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = SquareBounds {
            min_lon: 0.0,
            max_lon: 1.0,
            min_lat: 0.0,
            max_lat: 1.0,
        };
        assert!(bounds.contains(Point::new(0.0, 0.0)));
        assert!(bounds.contains(Point::new(1.0, 1.0)));
        assert!(!bounds.contains(Point::new(1.000_001, 0.5)));
    }

    #[test]
    fn point_wkt_matches_postgis_text() {
        assert_eq!(point_wkt(Point::new(13.405, 52.52)), "POINT(13.405 52.52)");
        assert_eq!(point_wkt(Point::new(-1.0, 0.5)), "POINT(-1 0.5)");
    }
}
