use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::recommend::RecommendError;
use crate::resume::ResumeError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("statement too short: {length} code points (minimum {min})")]
    TextTooShort { length: usize, min: usize },

    #[error("statement too long: {length} code points (maximum {max})")]
    TextTooLong { length: usize, max: usize },

    #[error("resume not found: {0}")]
    ResumeNotFound(String),

    #[error("recommendation unavailable: {0}")]
    RecommendationUnavailable(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ResumeError> for GatewayError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::NotFound { id } => GatewayError::ResumeNotFound(id.to_string()),
            ResumeError::TextTooShort { length, min } => {
                GatewayError::TextTooShort { length, min }
            }
            ResumeError::TextTooLong { length, max } => GatewayError::TextTooLong { length, max },
        }
    }
}

impl From<RecommendError> for GatewayError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::ResumeNotFound { id } => GatewayError::ResumeNotFound(id.to_string()),
            RecommendError::TextTooShort { length, min } => {
                GatewayError::TextTooShort { length, min }
            }
            RecommendError::Unavailable { message } => {
                GatewayError::RecommendationUnavailable(message)
            }
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            GatewayError::TextTooShort { .. } => (StatusCode::BAD_REQUEST, "TEXT_TOO_SHORT"),
            GatewayError::TextTooLong { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, "TEXT_TOO_LONG")
            }
            GatewayError::ResumeNotFound(_) => (StatusCode::NOT_FOUND, "RESUME_NOT_FOUND"),
            GatewayError::RecommendationUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "RECOMMENDATION_UNAVAILABLE",
            ),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code,
        });

        (status, body).into_response()
    }
}
