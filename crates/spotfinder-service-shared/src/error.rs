//! Plain-text error responses.
//!
//! Clients get a short message and a status code, nothing else. Underlying
//! store errors are logged by the handler and never echoed back.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use spotfinder_lib::ParamError;

/// Body sent when the spatial store fails.
pub const MSG_STORE_FAILURE: &str = "Error retrieving spots";

/// Body sent when the success payload cannot be serialized.
pub const MSG_SERIALIZATION_FAILURE: &str = "Error creating JSON response";

/// Body sent when the query string itself cannot be decoded.
pub const MSG_INVALID_QUERY: &str = "Invalid query string";

/// An HTTP error with a plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 with the generic store failure message.
    pub fn store_failure() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_STORE_FAILURE)
    }

    /// 500 with the serialization failure message.
    pub fn serialization_failure() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_SERIALIZATION_FAILURE)
    }

    /// 503 Service Unavailable.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ParamError> for ApiError {
    fn from(err: ParamError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, format!("{}\n", self.message)).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}
