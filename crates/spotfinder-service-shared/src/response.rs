//! Response wrapper for successful HTTP responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::ApiError;

/// A 200 OK JSON response.
///
/// The body is serialized up front so that a failure becomes a plain-text
/// 500 with a fixed message rather than leaking serializer details.
///
/// # Example
///
/// ```
/// use spotfinder_lib::SpotsResponse;
/// use spotfinder_service_shared::ServiceResponse;
///
/// let response = ServiceResponse::new(SpotsResponse::default());
/// assert_eq!(response.data.spots.len(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    pub data: T,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.data) {
            Ok(body) => (
                StatusCode::OK,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "failed to serialize response body");
                ApiError::serialization_failure().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;

    #[derive(Debug, Clone, Serialize, PartialEq)]
    struct TestData {
        value: i32,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_response_is_json() {
        let response = ServiceResponse::new(TestData { value: 42 }).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_response_from_trait() {
        let data = TestData { value: 99 };
        let response: ServiceResponse<TestData> = data.clone().into();
        assert_eq!(response.data, data);
    }

    #[test]
    fn test_serialization_failure_becomes_500() {
        let response = ServiceResponse::new(Unserializable).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
