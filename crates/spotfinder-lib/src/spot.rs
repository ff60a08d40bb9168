use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A point of interest as returned to clients.
///
/// Spots are owned by the spatial store; this crate only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Opaque identifier assigned by the store.
    pub id: String,
    pub name: String,
    /// `None` serializes as `null`, never as an empty string.
    pub website: Option<String>,
    /// Well-known-text point, e.g. `POINT(13.405 52.52)`.
    pub coordinates: String,
    pub description: Option<String>,
    pub rating: f64,
    /// Geodesic distance from the query centre in metres. Only circle
    /// searches populate it; otherwise the field is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Spot {
    /// Reject rows that break the output contract.
    pub(crate) fn checked(self) -> Result<Self> {
        if !self.rating.is_finite() {
            return Err(Error::InvalidRow {
                id: self.id,
                message: format!("rating {} is not finite", self.rating),
            });
        }
        Ok(self)
    }
}

/// Ordered result set for one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotsResponse {
    pub spots: Vec<Spot>,
}

impl SpotsResponse {
    pub fn new(spots: Vec<Spot>) -> Self {
        Self { spots }
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}
