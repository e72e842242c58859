//! Mapping of lifecycle errors onto HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use infraflow_application::LifecycleError;
use serde_json::json;

/// A lifecycle failure rendered as `{"error": ...}` with a matching status
#[derive(Debug)]
pub struct ApiError(pub LifecycleError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            LifecycleError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
            LifecycleError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LifecycleError::AlreadyFinished(_) => StatusCode::CONFLICT,
            LifecycleError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
