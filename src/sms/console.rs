//! Console Sender
//!
//! Logs messages instead of delivering them, for running the server
//! without a provider account.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use super::sender::{mask_phone_number, MessageSender, SendError};

/// Message sender that writes every message to the log.
#[derive(Debug, Default)]
pub struct ConsoleSender {
    sent: AtomicU64,
}

impl ConsoleSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages "sent" so far.
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageSender for ConsoleSender {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<(), SendError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        info!(
            "[console sms] to={} from={} body={:?}",
            mask_phone_number(to),
            from,
            body
        );
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sender_always_succeeds() {
        let sender = ConsoleSender::new();

        sender
            .send("+10123456789", "+15550421337", "[#] Use 123456 as your code for the app!\nfake")
            .await
            .unwrap();
        sender.send("+10123456789", "+15550421337", "again").await.unwrap();

        assert_eq!(sender.sent_count(), 2);
        assert_eq!(sender.provider_name(), "console");
    }
}
