use axum::{
    extract::rejection::{BytesRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::shared::ProviderError;

/// Message returned for every failure we do not want to describe to the client
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{provider} API error ({status})")]
    Upstream {
        provider: &'static str,
        status: u16,
        details: Value,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error envelope returned by every handler
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Configuration(_) | Self::Upstream { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert to the client-facing envelope. Internal details stay in the logs.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::Upstream { details, .. } => ErrorResponse {
                message: self.to_string(),
                details: Some(details.clone()),
            },
            Self::Internal(_) => ErrorResponse {
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                details: None,
            },
            _ => ErrorResponse {
                message: self.to_string(),
                details: None,
            },
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Configuration(msg) => AppError::Configuration(msg),
            ProviderError::Upstream {
                provider,
                status,
                details,
            } => AppError::Upstream {
                provider,
                status,
                details,
            },
            other @ (ProviderError::Transport { .. } | ProviderError::Decode { .. }) => {
                AppError::Internal(other.to_string())
            }
        }
    }
}

/// Body extraction failures: over the body limit is 413, anything else is the client's fault
fn from_rejection(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        let error_response = self.to_response();

        (status, Json(error_response)).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
