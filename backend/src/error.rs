//! Error handling for the Crop Advisory service
//!
//! Every failure reaches the client as `{ "error": "..." }` with a 4xx
//! status. Internal details only go to the log.

use std::any::Any;

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::external::{EstimatorError, ImageError};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Email already registered")]
    EmailTaken,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] shared::ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Could not parse request text: {0}")]
    Parse(#[from] shared::ParseError),

    // Collaborator errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Yield estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Status code and client-facing message
    fn parts(&self) -> (StatusCode, String) {
        match self {
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::EmailTaken => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Parse(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Image(ImageError::Undecodable(_)) | AppError::Image(ImageError::Empty) => {
                (StatusCode::BAD_REQUEST, "Image not found!".to_string())
            }
            AppError::Image(ImageError::Timeout) => (
                StatusCode::BAD_REQUEST,
                "Image processing timed out".to_string(),
            ),
            AppError::Image(ImageError::TooLarge { limit }) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Image exceeds the {} byte upload limit", limit),
            ),
            AppError::Estimator(EstimatorError::FeatureCount { .. }) => (
                StatusCode::BAD_REQUEST,
                "Input does not match the yield model".to_string(),
            ),
            AppError::Estimator(_)
            | AppError::Configuration(_)
            | AppError::Internal(_)
            | AppError::InternalError(_) => (
                StatusCode::BAD_REQUEST,
                "Unable to process request".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();

        // Log the error for debugging
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Rejected request: {:?}", self);
        } else {
            tracing::error!("Error: {:?}", self);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::InvalidInput(err.body_text())
    }
}

/// Response for a handler that panicked, in the same `{error}` shape
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
