// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tabitha_core::LlmError;
use thiserror::Error;
use ts_rs::TS;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize, TS)]
#[ts(export)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes.
///
/// Every operation is all-or-nothing: a collaborator failure (including a
/// timeout) fails the request with no partial result. Only record-level
/// skipping inside the pipeline is partial.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("query parsing failed: {0}")]
    ParseFailure(#[source] LlmError),

    #[error("recommendation failed: {0}")]
    RecommenderFailure(#[source] LlmError),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::MissingInput(what) => {
                tracing::warn!(missing = %what, "request missing input");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Missing input", what.clone()),
                )
            }
            ApiError::ParseFailure(source) => {
                tracing::error!(error = %source, "query parser collaborator failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::with_details("Failed to parse query", source.to_string()),
                )
            }
            ApiError::RecommenderFailure(source) => {
                tracing::error!(error = %source, "recommender collaborator failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::with_details("Failed to generate recommendations", source.to_string()),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(message = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
