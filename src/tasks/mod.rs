//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Code sweep: drops expired codes at the configured interval, when enabled

mod cleanup;

pub use cleanup::spawn_cleanup_task;
