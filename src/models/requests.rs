//! Request DTOs for the verification API
//!
//! Defines the structure of incoming HTTP request bodies. Fields are
//! optional so that a missing field can be reported with a specific message
//! instead of a generic deserialization error. Values are kept as raw JSON
//! so a field of the wrong type reaches the handler instead of failing the
//! whole body.

use serde::Deserialize;
use serde_json::Value;

/// Request body for POST /api/request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeRequest {
    pub client_secret: Option<Value>,
    pub phone: Option<Value>,
}

impl CodeRequest {
    /// Returns `(client_secret, phone)`, or an error message if either is missing.
    pub fn validate(self) -> Result<(Value, Value), String> {
        match (self.client_secret, self.phone) {
            (Some(secret), Some(phone)) => Ok((secret, phone)),
            _ => Err("Both client_secret and phone are required.".to_string()),
        }
    }
}

/// Request body for POST /api/verify
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyRequest {
    pub client_secret: Option<Value>,
    pub phone: Option<Value>,
    /// Full text of the SMS the client received
    pub sms_message: Option<Value>,
}

impl VerifyRequest {
    /// Returns `(client_secret, phone, sms_message)`, or an error message if any is missing.
    pub fn validate(self) -> Result<(Value, Value, Value), String> {
        match (self.client_secret, self.phone, self.sms_message) {
            (Some(secret), Some(phone), Some(message)) => Ok((secret, phone, message)),
            _ => Err("The client_secret, phone, and sms_message are required.".to_string()),
        }
    }
}

/// Request body for POST /api/reset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetRequest {
    pub client_secret: Option<Value>,
    pub phone: Option<Value>,
}

impl ResetRequest {
    /// Returns `(client_secret, phone)`, or an error message if either is missing.
    pub fn validate(self) -> Result<(Value, Value), String> {
        match (self.client_secret, self.phone) {
            (Some(secret), Some(phone)) => Ok((secret, phone)),
            _ => Err("The client_secret and phone are required".to_string()),
        }
    }
}
