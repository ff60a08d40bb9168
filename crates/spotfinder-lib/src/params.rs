//! Validation of raw search parameters.
//!
//! The HTTP boundary hands over the four query parameters as optional
//! strings. [`SearchParams::parse`] turns them into typed values or a
//! [`ParamError`] naming the first offending field. Only syntax is checked:
//! coordinates outside ±90/±180 and non-positive radii pass through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of the search area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchShape {
    /// Geodesic radius around the centre point.
    Circle,
    /// Latitude/longitude bounding box around the centre point.
    Square,
}

impl SearchShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchShape::Circle => "circle",
            SearchShape::Square => "square",
        }
    }
}

impl fmt::Display for SearchShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchShape {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(SearchShape::Circle),
            "square" => Ok(SearchShape::Square),
            _ => Err(ParamError::InvalidShape),
        }
    }
}

/// Rejection produced by the parameter validator.
///
/// The `Display` output is the exact message sent back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Invalid latitude")]
    InvalidLatitude,

    #[error("Invalid longitude")]
    InvalidLongitude,

    #[error("Invalid radius")]
    InvalidRadius,

    #[error("Invalid location type. Valid types are 'circle' and 'square'")]
    InvalidShape,
}

impl ParamError {
    /// Name of the query parameter that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            ParamError::InvalidLatitude => "latitude",
            ParamError::InvalidLongitude => "longitude",
            ParamError::InvalidRadius => "radius",
            ParamError::InvalidShape => "type",
        }
    }
}

/// Unvalidated query parameters exactly as they arrived.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSearchParams<'a> {
    pub latitude: Option<&'a str>,
    pub longitude: Option<&'a str>,
    pub radius: Option<&'a str>,
    pub shape: Option<&'a str>,
}

/// Validated search input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Centre latitude in degrees.
    pub latitude: f64,
    /// Centre longitude in degrees.
    pub longitude: f64,
    /// Search radius. Metres for circles; the square strategy treats the
    /// same number as kilometres (see [`crate::geometry::EARTH_RADIUS_KM`]).
    pub radius: f64,
    pub shape: SearchShape,
}

impl SearchParams {
    /// Validate raw parameters.
    ///
    /// Fields are checked in the order latitude, longitude, radius, type and
    /// the first failure is returned.
    pub fn parse(raw: RawSearchParams<'_>) -> Result<Self, ParamError> {
        let latitude = parse_finite(raw.latitude).ok_or(ParamError::InvalidLatitude)?;
        let longitude = parse_finite(raw.longitude).ok_or(ParamError::InvalidLongitude)?;
        let radius = parse_finite(raw.radius).ok_or(ParamError::InvalidRadius)?;
        let shape = raw.shape.unwrap_or_default().parse::<SearchShape>()?;

        Ok(Self {
            latitude,
            longitude,
            radius,
            shape,
        })
    }
}

fn parse_finite(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw<'a>(lat: &'a str, lon: &'a str, radius: &'a str, shape: &'a str) -> RawSearchParams<'a> {
        RawSearchParams {
            latitude: Some(lat),
            longitude: Some(lon),
            radius: Some(radius),
            shape: Some(shape),
        }
    }

    #[test]
    fn parses_valid_circle() {
        let params = SearchParams::parse(raw("52.52", "13.405", "1500", "circle")).unwrap();
        assert_eq!(params.latitude, 52.52);
        assert_eq!(params.longitude, 13.405);
        assert_eq!(params.radius, 1500.0);
        assert_eq!(params.shape, SearchShape::Circle);
    }

    #[test]
    fn parses_valid_square_with_scientific_notation() {
        let params = SearchParams::parse(raw("-3.5e1", "1E2", "2.5", "square")).unwrap();
        assert_eq!(params.latitude, -35.0);
        assert_eq!(params.longitude, 100.0);
        assert_eq!(params.shape, SearchShape::Square);
    }

    #[test]
    fn rejects_bad_latitude_first() {
        let err = SearchParams::parse(raw("abc", "xyz", "nope", "triangle")).unwrap_err();
        assert_eq!(err, ParamError::InvalidLatitude);
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn rejects_bad_longitude() {
        let err = SearchParams::parse(raw("1", "east", "1", "circle")).unwrap_err();
        assert_eq!(err, ParamError::InvalidLongitude);
        assert_eq!(err.field(), "longitude");
    }

    #[test]
    fn rejects_bad_radius() {
        let err = SearchParams::parse(raw("1", "1", "", "circle")).unwrap_err();
        assert_eq!(err, ParamError::InvalidRadius);
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert_eq!(
            SearchParams::parse(raw("NaN", "1", "1", "circle")).unwrap_err(),
            ParamError::InvalidLatitude
        );
        assert_eq!(
            SearchParams::parse(raw("1", "inf", "1", "circle")).unwrap_err(),
            ParamError::InvalidLongitude
        );
        assert_eq!(
            SearchParams::parse(raw("1", "1", "-infinity", "circle")).unwrap_err(),
            ParamError::InvalidRadius
        );
    }

    #[test]
    fn rejects_missing_fields() {
        let err = SearchParams::parse(RawSearchParams::default()).unwrap_err();
        assert_eq!(err, ParamError::InvalidLatitude);

        let err = SearchParams::parse(RawSearchParams {
            shape: None,
            ..raw("1", "2", "3", "circle")
        })
        .unwrap_err();
        assert_eq!(err, ParamError::InvalidShape);
    }

    #[test]
    fn rejects_unknown_shape() {
        for shape in ["triangle", "", "Circle", "SQUARE", " circle"] {
            let err = SearchParams::parse(raw("1", "1", "1", shape)).unwrap_err();
            assert_eq!(err, ParamError::InvalidShape, "shape {shape:?}");
            let message = err.to_string();
            assert!(message.contains("'circle'"));
            assert!(message.contains("'square'"));
        }
    }

    #[test]
    fn passes_through_out_of_range_values() {
        let params = SearchParams::parse(raw("95", "-200", "-10", "square")).unwrap();
        assert_eq!(params.latitude, 95.0);
        assert_eq!(params.longitude, -200.0);
        assert_eq!(params.radius, -10.0);

        let params = SearchParams::parse(raw("0", "0", "0", "circle")).unwrap();
        assert_eq!(params.radius, 0.0);
    }

    #[test]
    fn shape_serialization() {
        assert_eq!(
            serde_json::to_string(&SearchShape::Circle).unwrap(),
            "\"circle\""
        );
        let square: SearchShape = serde_json::from_str("\"square\"").unwrap();
        assert_eq!(square, SearchShape::Square);
        assert_eq!(SearchShape::Square.to_string(), "square");
    }
}
