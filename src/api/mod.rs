//! API Module
//!
//! HTTP handlers and routing for the verification REST API.
//!
//! # Endpoints
//! - `POST /api/request` - Send a one-time code
//! - `POST /api/verify` - Verify a received code
//! - `POST /api/reset` - Reset the outstanding code
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
