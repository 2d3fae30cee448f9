//! Verification Module
//!
//! One-time code lifecycle: generation, delivery, verification and reset.
//!
//! Per phone number: no code → `request` → code pending → (`verify` leaves
//! it pending) → expiry, `reset` or a new `request` → no code.

mod code;
mod manager;

pub use code::{generate_code, CODE_MAX, CODE_MIN};
pub use manager::{VerificationManager, DEFAULT_EXPIRATION_SECS};
