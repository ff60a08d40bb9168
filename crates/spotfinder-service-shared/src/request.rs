//! Request types and validation for HTTP endpoints.

use spotfinder_lib::{RawSearchParams, SearchParams};

use crate::ApiError;

/// Validation trait for request types.
///
/// Implementations check every field and either produce the typed input the
/// handler needs or an [`ApiError`] describing the first invalid field.
pub trait Validate {
    /// Typed, validated form of the request.
    type Output;

    fn validate(&self) -> Result<Self::Output, ApiError>;
}

/// Query string of `GET /spots`.
///
/// Every field is kept as raw text so that missing and malformed values
/// reach the validator and produce its field-specific messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotsQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius: Option<String>,
    /// The `type` parameter: `circle` or `square`.
    pub shape: Option<String>,
}

impl SpotsQuery {
    /// Collect decoded query pairs. A repeated key keeps its first value and
    /// unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "latitude" => &mut query.latitude,
                "longitude" => &mut query.longitude,
                "radius" => &mut query.radius,
                "type" => &mut query.shape,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    fn raw(&self) -> RawSearchParams<'_> {
        RawSearchParams {
            latitude: self.latitude.as_deref(),
            longitude: self.longitude.as_deref(),
            radius: self.radius.as_deref(),
            shape: self.shape.as_deref(),
        }
    }
}

impl Validate for SpotsQuery {
    type Output = SearchParams;

    fn validate(&self) -> Result<SearchParams, ApiError> {
        SearchParams::parse(self.raw()).map_err(ApiError::from)
    }
}
