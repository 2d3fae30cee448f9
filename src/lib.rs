//! SMS Verify - Phone number verification server
//!
//! Issues six-digit one-time codes by SMS, keeps them in memory for a
//! bounded time and checks them when the client reports the message back.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod sms;
pub mod tasks;
pub mod verify;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
pub use verify::VerificationManager;
