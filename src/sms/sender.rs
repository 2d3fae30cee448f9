//! Message Sender Interface
//!
//! Defines the capability the verification manager uses to deliver codes.

use async_trait::async_trait;
use thiserror::Error;

// == Send Error ==
/// Failure reported by a message provider.
#[derive(Error, Debug)]
pub enum SendError {
    /// The provider could not be reached or the response could not be read
    #[error("SMS provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("SMS provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

// == Message Sender ==
/// Delivers a text message through an SMS provider.
///
/// Implementations own their own timeout policy. Callers do not retry.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `body` to `to`, originating from `from`.
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<(), SendError>;

    /// Name of the provider, for logs.
    fn provider_name(&self) -> &str;
}

// == Utility Functions ==
/// Masks a phone number for logging, keeping only the last four digits.
///
/// ```
/// use sms_verify::sms::mask_phone_number;
///
/// assert_eq!(mask_phone_number("+15550005555"), "+*******5555");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let visible = 4;
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= visible {
        return "*".repeat(chars.len());
    }

    let tail: String = chars[chars.len() - visible..].iter().collect();
    match chars.first() {
        Some('+') => format!("+{}{}", "*".repeat(chars.len() - visible - 1), tail),
        _ => format!("{}{}", "*".repeat(chars.len() - visible), tail),
    }
}
