//! Response DTOs for the verification API
//!
//! Defines the structure of outgoing HTTP response bodies. Every API body
//! carries a `success` flag.

use serde::Serialize;

/// Response body for POST /api/request
#[derive(Debug, Clone, Serialize)]
pub struct CodeResponse {
    pub success: bool,
    /// Seconds the issued code stays valid
    pub time: u64,
}

impl CodeResponse {
    pub fn new(time: u64) -> Self {
        Self {
            success: true,
            time,
        }
    }
}

/// Response body for POST /api/verify and POST /api/reset
#[derive(Debug, Clone, Serialize)]
pub struct PhoneResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PhoneResponse {
    /// The operation succeeded for `phone`
    pub fn confirmed(phone: impl Into<String>) -> Self {
        Self {
            success: true,
            phone: Some(phone.into()),
            message: None,
        }
    }

    /// The operation was refused with `message`
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            phone: None,
            message: Some(message.into()),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// SMS provider in use
    pub provider: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(provider: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            provider: provider.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Error message describing what went wrong
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
