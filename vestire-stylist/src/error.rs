//! Error types for vestire-stylist

use crate::services::RecommendError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Closet below the recommendation minimum (400)
    #[error("{0}")]
    ClosetTooSmall(String),

    /// Neither curated, generated nor assembled outfits available (503)
    #[error("{0}")]
    GenerationUnavailable(String),

    /// vestire-common error
    #[error("Common error: {0}")]
    Common(#[from] vestire_common::Error),
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::ClosetTooSmall { .. } => ApiError::ClosetTooSmall(err.to_string()),
            RecommendError::GenerationUnavailable => {
                ApiError::GenerationUnavailable(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::ClosetTooSmall(msg) => (StatusCode::BAD_REQUEST, "CLOSET_TOO_SMALL", msg),
            ApiError::GenerationUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "GENERATION_UNAVAILABLE",
                msg,
            ),
            ApiError::Common(vestire_common::Error::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMMON_ERROR",
                err.to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, message = %message, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_error_mapping() {
        let small: ApiError = RecommendError::ClosetTooSmall { count: 1, minimum: 3 }.into();
        assert_eq!(small.into_response().status(), StatusCode::BAD_REQUEST);

        let unavailable: ApiError = RecommendError::GenerationUnavailable.into();
        assert_eq!(
            unavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = ApiError::Common(vestire_common::Error::InvalidInput("bad mood".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
