//! Request and Response models for the verification API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CodeRequest, ResetRequest, VerifyRequest};
pub use responses::{CodeResponse, ErrorResponse, HealthResponse, PhoneResponse};
