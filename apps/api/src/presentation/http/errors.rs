//! HTTP error handling and response conversion.
//!
//! Every failure leaves the service as a JSON body of the shape
//! `{"error": <message>, "details"?: <detail>}`. Client mistakes carry only the
//! message; upstream and unexpected failures add the underlying detail.

use crate::{
    application::generate_poem::use_case::GeneratePoemError,
    domain::poem::errors::ImageValidationError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::{any::Any, fmt};

/// Application-level errors returned from handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Request validation failed (400).
    BadRequest(String),

    /// Blob store write failed (500).
    Storage(String),

    /// Language model failed or returned nothing (500).
    Generation(String),

    /// Anything not anticipated above, panics included (500).
    Unexpected(String),
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
            Self::Generation(msg) => write!(f, "Generation error: {}", msg),
            Self::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Generation(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body sent to the client.
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::BadRequest(msg) => ErrorBody {
                error: msg.clone(),
                details: None,
            },
            Self::Storage(details) => ErrorBody {
                error: "Failed to upload image".into(),
                details: Some(details.clone()),
            },
            Self::Generation(details) | Self::Unexpected(details) => ErrorBody {
                error: "Failed to generate poem".into(),
                details: Some(details.clone()),
            },
        }
    }

    /// Converts a caught panic payload into the outer failure envelope.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let details = if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else if let Some(msg) = payload.downcast_ref::<&str>() {
            msg.to_string()
        } else {
            String::new()
        };

        if details.is_empty() {
            Self::Unexpected("Unknown error".into())
        } else {
            Self::Unexpected(details)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Upstream failures are already logged with context by the use case.
        match &self {
            AppError::BadRequest(_) => tracing::warn!("error={}", self),
            AppError::Storage(_) | AppError::Generation(_) => tracing::debug!("error={}", self),
            AppError::Unexpected(_) => tracing::error!("error={}", self),
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<ImageValidationError> for AppError {
    fn from(err: ImageValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<GeneratePoemError> for AppError {
    fn from(err: GeneratePoemError) -> Self {
        match err {
            GeneratePoemError::Upload(details) => AppError::Storage(details),
            GeneratePoemError::Generation(details) => AppError::Generation(details),
            GeneratePoemError::EmptyPoem => {
                AppError::Generation(GeneratePoemError::EmptyPoem.to_string())
            }
        }
    }
}
