//! Search-area strategies.
//!
//! An [`AreaQuery`] is the backend-neutral description of what a store must
//! return for one request. Each backend translates it into its own
//! parameterized SQL; the pure [`AreaQuery::contains`] predicate mirrors that
//! SQL so results can be checked without a database.

use geo::Point;

use crate::geometry::{geodesic_distance, SquareBounds};
use crate::params::{SearchParams, SearchShape};

/// One validated area search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaQuery {
    /// Spots within `radius_m` geodesic metres of `center`, ordered by
    /// distance ascending then rating descending. Rows carry their distance.
    Circle { center: Point<f64>, radius_m: f64 },
    /// Spots inside `bounds`, ordered by geodesic distance to `center`.
    /// Rows carry no distance.
    Square {
        center: Point<f64>,
        bounds: SquareBounds,
    },
}

impl AreaQuery {
    pub fn from_params(params: &SearchParams) -> Self {
        let center = Point::new(params.longitude, params.latitude);
        match params.shape {
            SearchShape::Circle => AreaQuery::Circle {
                center,
                radius_m: params.radius,
            },
            SearchShape::Square => AreaQuery::Square {
                center,
                bounds: SquareBounds::around(center, params.radius),
            },
        }
    }

    pub fn center(&self) -> Point<f64> {
        match self {
            AreaQuery::Circle { center, .. } | AreaQuery::Square { center, .. } => *center,
        }
    }

    pub fn shape(&self) -> SearchShape {
        match self {
            AreaQuery::Circle { .. } => SearchShape::Circle,
            AreaQuery::Square { .. } => SearchShape::Square,
        }
    }

    /// Whether a spot at `point` belongs to this area.
    pub fn contains(&self, point: Point<f64>) -> bool {
        match self {
            AreaQuery::Circle { center, radius_m } => {
                geodesic_distance(*center, point) <= *radius_m
            }
            AreaQuery::Square { bounds, .. } => bounds.contains(point),
        }
    }

    /// Whether rows produced for this query carry a `distance` value.
    pub fn reports_distance(&self) -> bool {
        matches!(self, AreaQuery::Circle { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(shape: SearchShape, radius: f64) -> SearchParams {
        SearchParams {
            latitude: 52.52,
            longitude: 13.405,
            radius,
            shape,
        }
    }

    #[test]
    fn circle_query_keeps_radius_in_metres() {
        let query = AreaQuery::from_params(&params(SearchShape::Circle, 750.0));
        match query {
            AreaQuery::Circle { center, radius_m } => {
                assert_eq!(center.x(), 13.405);
                assert_eq!(center.y(), 52.52);
                assert_eq!(radius_m, 750.0);
            }
            other => panic!("unexpected query: {other:?}"),
        }
        assert!(query.reports_distance());
        assert_eq!(query.shape(), SearchShape::Circle);
    }

    #[test]
    fn square_query_builds_bounds() {
        let query = AreaQuery::from_params(&params(SearchShape::Square, 2.0));
        match query {
            AreaQuery::Square { center, bounds } => {
                assert_eq!(bounds, SquareBounds::around(center, 2.0));
                assert!(bounds.min_lon < 13.405 && bounds.max_lon > 13.405);
                assert!(bounds.min_lat < 52.52 && bounds.max_lat > 52.52);
            }
            other => panic!("unexpected query: {other:?}"),
        }
        assert!(!query.reports_distance());
    }

    #[test]
    fn circle_contains_uses_geodesic_distance() {
        let query = AreaQuery::from_params(&params(SearchShape::Circle, 1000.0));
        let center = query.center();
        // ~0.005° of latitude is ~556 m.
        assert!(query.contains(Point::new(center.x(), center.y() + 0.005)));
        // ~0.01° of latitude is ~1113 m.
        assert!(!query.contains(Point::new(center.x(), center.y() + 0.01)));
        assert!(query.contains(center));
    }

    #[test]
    fn zero_radius_circle_contains_only_center() {
        let query = AreaQuery::from_params(&params(SearchShape::Circle, 0.0));
        assert!(query.contains(query.center()));
        assert!(!query.contains(Point::new(13.405, 52.520_01)));
    }

    #[test]
    fn square_contains_uses_bounds_not_distance() {
        // radius 1 => ~0.009° latitude, ~0.0148° longitude at 52.52°N.
        let query = AreaQuery::from_params(&params(SearchShape::Square, 1.0));
        let corner = Point::new(13.405 + 0.014, 52.52 + 0.0085);
        assert!(query.contains(corner));
        assert!(!query.contains(Point::new(13.405, 52.52 + 0.01)));
    }
}
