//! SMS Module
//!
//! Message-sending capability used to deliver one-time codes.
//!
//! # Providers
//! - `twilio` - Twilio REST API
//! - `console` - logs messages, for local development

mod console;
mod sender;
mod twilio;

pub use console::ConsoleSender;
pub use sender::{mask_phone_number, MessageSender, SendError};
pub use twilio::{TwilioCredentials, TwilioSender};
