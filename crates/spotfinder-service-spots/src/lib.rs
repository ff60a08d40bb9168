//! Spotfinder nearby-spots HTTP microservice.
//!
//! # Endpoints
//!
//! - `GET /spots?latitude=&longitude=&radius=&type=` - Spots inside a circle or square
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe (pings the store)
//! - `GET /metrics` - Prometheus metrics, when enabled
//!
//! The process bootstrap lives in `main.rs`; this library exposes the router
//! so it can be exercised in tests without binding a socket.

#![deny(warnings)]

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use spotfinder_lib::{find_spots, SpotsResponse};
use spotfinder_service_shared::{
    health_live, health_ready, metrics_handler, record_search_completed, record_search_failed,
    ApiError, AppState, MetricsConfig, MetricsLayer, RequestId, ServiceResponse, SpotsQuery,
    Validate, MSG_INVALID_QUERY,
};

/// Build the service router.
///
/// The metrics route is mounted at `metrics.path` only when metrics are
/// enabled. [`MetricsLayer`] is the outermost layer so every response,
/// including rejections, carries a request id.
pub fn router(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut app = Router::new()
        .route("/spots", get(spots_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        app = app.route(&metrics.path, get(metrics_handler));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `GET /spots`.
///
/// 400 for unparsable or invalid parameters, 500 when the store fails,
/// otherwise 200 with `{"spots": [...]}`. A repeated parameter keeps its
/// first value.
pub async fn spots_handler(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ServiceResponse<SpotsResponse>, ApiError> {
    let request_id = request_id
        .map(|Extension(id)| id)
        .unwrap_or_else(RequestId::generate);

    let Query(pairs) = query.map_err(|rejection| {
        info!(request_id = %request_id, error = %rejection, "rejected query string");
        record_search_failed("invalid_query");
        ApiError::bad_request(MSG_INVALID_QUERY)
    })?;

    let params = SpotsQuery::from_pairs(pairs).validate().map_err(|err| {
        info!(request_id = %request_id, error = %err.message(), "invalid search parameters");
        record_search_failed("validation_error");
        err
    })?;

    info!(
        request_id = %request_id,
        latitude = params.latitude,
        longitude = params.longitude,
        radius = params.radius,
        shape = %params.shape,
        "searching spots"
    );

    let response = find_spots(state.store(), &params).await.map_err(|e| {
        error!(
            request_id = %request_id,
            backend = state.store().backend(),
            error = %e,
            "spot search failed"
        );
        record_search_failed("store_error");
        ApiError::store_failure()
    })?;

    record_search_completed(params.shape.as_str(), response.len());
    info!(request_id = %request_id, count = response.len(), "spots found");

    Ok(ServiceResponse::new(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use spotfinder_service_shared::test_utils::{fixture_spots::BERLIN, fixture_state};

    fn query(shape: &str, radius: &str) -> Vec<(String, String)> {
        vec![
            ("latitude".to_string(), BERLIN.1.to_string()),
            ("longitude".to_string(), BERLIN.0.to_string()),
            ("radius".to_string(), radius.to_string()),
            ("type".to_string(), shape.to_string()),
        ]
    }

    #[tokio::test]
    async fn test_spots_handler_circle() {
        let (_dir, state) = fixture_state();
        let response = spots_handler(State(state), None, Ok(Query(query("circle", "1000"))))
            .await
            .unwrap();
        assert_eq!(response.data.len(), 3);
        assert!(response.data.spots.iter().all(|s| s.distance.is_some()));
    }

    #[tokio::test]
    async fn test_spots_handler_rejects_bad_shape() {
        let (_dir, state) = fixture_state();
        let err = spots_handler(State(state), None, Ok(Query(query("hexagon", "1000"))))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
