use tracing::debug;

use crate::area::AreaQuery;
use crate::error::Result;
use crate::params::SearchParams;
use crate::spot::SpotsResponse;
use crate::store::SpotStore;

/// Run one validated search against `store`.
///
/// The result preserves the store's ordering. Any store failure fails the
/// whole search; partial results are never returned.
pub async fn find_spots(store: &dyn SpotStore, params: &SearchParams) -> Result<SpotsResponse> {
    let query = AreaQuery::from_params(params);
    debug!(
        backend = store.backend(),
        shape = %params.shape,
        latitude = params.latitude,
        longitude = params.longitude,
        radius = params.radius,
        "running area query"
    );

    let spots = store.spots_in_area(&query).await?;
    debug!(count = spots.len(), "area query returned");

    Ok(SpotsResponse::new(spots))
}
