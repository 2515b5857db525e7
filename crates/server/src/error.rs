//! HTTP-facing error type.
//!
//! Callers only ever see a fixed message per status; the detail carried by
//! each variant is logged server-side.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Recommendation failed: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::StudentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned in the `error` field of the response body
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) => "Invalid input format",
            ApiError::StudentNotFound(_) => "Student not found",
            ApiError::Internal(_) => "Error generating recommendations",
        }
    }
}

impl From<pipeline::PipelineError> for ApiError {
    fn from(err: pipeline::PipelineError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(_) => error!("{}", self),
            _ => warn!("{}", self),
        }
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
