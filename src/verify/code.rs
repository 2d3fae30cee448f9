//! One-time code generation.

use rand::{rngs::OsRng, Rng};

/// Smallest code that can be issued (six digits, no leading zero)
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Draws a six-digit code uniformly from `[CODE_MIN, CODE_MAX]`.
///
/// Uses the operating system CSPRNG since the code authenticates the owner
/// of a phone number.
pub fn generate_code() -> u32 {
    let mut rng = OsRng;
    rng.gen_range(CODE_MIN..=CODE_MAX)
}
