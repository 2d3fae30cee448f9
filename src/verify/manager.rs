//! Verification Manager
//!
//! Issues one-time codes, delivers them by SMS and checks them against what
//! the client later reports.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::sms::{mask_phone_number, MessageSender, SendError};

use super::code::generate_code;

/// Lifetime of an issued code in seconds (15 minutes)
pub const DEFAULT_EXPIRATION_SECS: u64 = 900;

/// Owns the outstanding code for every phone number.
///
/// Each phone number holds at most one code. Codes are never distinguished
/// by why they are missing: never requested, expired and reset all look
/// the same to `verify` and `reset`.
pub struct VerificationManager {
    /// Outstanding codes keyed by phone number
    cache: RwLock<CacheStore<u32>>,
    /// Provider used to deliver codes
    sender: Arc<dyn MessageSender>,
    /// Originating phone number for outgoing messages
    sending_phone_number: String,
    /// Android SMS Retriever hash appended to each message
    app_hash: String,
    code_generator: fn() -> u32,
}

impl VerificationManager {
    /// Creates a manager delivering through `sender`.
    pub fn new(
        sender: Arc<dyn MessageSender>,
        sending_phone_number: impl Into<String>,
        app_hash: impl Into<String>,
    ) -> Self {
        Self {
            cache: RwLock::new(CacheStore::new()),
            sender,
            sending_phone_number: sending_phone_number.into(),
            app_hash: app_hash.into(),
            code_generator: generate_code,
        }
    }

    /// Replaces the code generator.
    pub fn with_code_generator(mut self, generator: fn() -> u32) -> Self {
        self.code_generator = generator;
        self
    }

    /// Builds the SMS body carrying `code`.
    pub fn message_for(&self, code: u32) -> String {
        format!("[#] Use {} as your code for the app!\n{}", code, self.app_hash)
    }

    // == Request ==
    /// Issues a new code for `phone` and sends it.
    ///
    /// Any code already outstanding for `phone` is replaced. The new code is
    /// cached before the send, so it stays cached if the send fails.
    ///
    /// Returns the number of seconds the code is valid for.
    pub async fn request(&self, phone: &str) -> Result<u64, SendError> {
        info!("Requesting SMS to be sent to {}", mask_phone_number(phone));

        let code = (self.code_generator)();
        self.cache
            .write()
            .await
            .set(phone, code, DEFAULT_EXPIRATION_SECS);

        let body = self.message_for(code);
        debug!("Outgoing message: {:?}", body);

        self.sender
            .send(phone, &self.sending_phone_number, &body)
            .await?;

        Ok(DEFAULT_EXPIRATION_SECS)
    }

    // == Verify ==
    /// Checks whether `sms_message` contains the code issued to `phone`.
    ///
    /// The message is the full SMS text the client received, so the code
    /// only has to appear somewhere in it. Verifying does not consume the
    /// code.
    pub async fn verify(&self, phone: &str, sms_message: &str) -> bool {
        info!("Verifying code for {}", mask_phone_number(phone));

        let cache = self.cache.read().await;
        let Some(code) = cache.get(phone) else {
            info!("No cached code found for {}", mask_phone_number(phone));
            return false;
        };

        if sms_message.contains(&code.to_string()) {
            info!("Code matched for {}", mask_phone_number(phone));
            true
        } else {
            info!("Code mismatch for {}", mask_phone_number(phone));
            false
        }
    }

    // == Reset ==
    /// Discards the outstanding code for `phone`.
    ///
    /// Returns `false` if there was no live code to discard.
    pub async fn reset(&self, phone: &str) -> bool {
        info!("Resetting code for {}", mask_phone_number(phone));

        let mut cache = self.cache.write().await;
        if cache.get(phone).is_none() {
            info!("No cached code found for {}", mask_phone_number(phone));
            return false;
        }

        cache.remove(phone);
        true
    }

    // == Purge Expired ==
    /// Drops expired codes from memory. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.cache.write().await.purge_expired()
    }

    /// Name of the provider codes are delivered through.
    pub fn provider_name(&self) -> &str {
        self.sender.provider_name()
    }

    /// Stores `code` for `phone` with a custom TTL, bypassing delivery.
    #[cfg(test)]
    pub(crate) async fn insert_code(&self, phone: &str, code: u32, ttl_seconds: u64) {
        self.cache.write().await.set(phone, code, ttl_seconds);
    }

    /// Number of stored codes, expired ones included.
    #[cfg(test)]
    pub(crate) async fn stored_codes(&self) -> usize {
        self.cache.read().await.len()
    }
}
