//! Error types for the verification server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::sms::SendError;

// == Config Error Enum ==
/// Startup configuration failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{key} is not set. {hint}")]
    Missing {
        key: &'static str,
        hint: &'static str,
    },

    /// A variable is set to a value that cannot be used
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

// == App Error Enum ==
/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or unauthorized request
    #[error("{0}")]
    InvalidRequest(String),

    /// The SMS provider failed to deliver the code
    #[error(transparent)]
    Send(#[from] SendError),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Send(err) => {
                tracing::error!("Failed to send verification code: {}", err);
                StatusCode::BAD_GATEWAY
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_status() {
        let response = AppError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_send_error_status() {
        let err = AppError::from(SendError::Rejected {
            status: 401,
            message: "Authenticate".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "SMS provider rejected the message (401): Authenticate"
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::Missing {
            key: "APP_HASH",
            hint: "Please provide a valid Android app hash",
        };
        assert_eq!(
            err.to_string(),
            "APP_HASH is not set. Please provide a valid Android app hash"
        );
    }
}
