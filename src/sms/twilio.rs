//! Twilio Sender
//!
//! Delivers messages through the Twilio Programmable Messaging REST API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use super::sender::{mask_phone_number, MessageSender, SendError};

/// Base URL of the Twilio REST API
const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Credentials for the Twilio API.
///
/// Authentication uses an API key/secret pair scoped to the account.
/// `Debug` output never includes the secret.
#[derive(Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[redacted]")
            .finish()
    }
}

/// Subset of the message resource returned on creation
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

/// Error body returned by Twilio on failure
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    message: String,
}

/// Message sender backed by Twilio.
pub struct TwilioSender {
    client: Client,
    credentials: TwilioCredentials,
    base_url: String,
}

impl TwilioSender {
    /// Creates a sender with the given credentials and request timeout.
    pub fn new(credentials: TwilioCredentials, timeout: Duration) -> Result<Self, SendError> {
        let client = Client::builder().timeout(timeout).build()?;

        info!(
            "Twilio sender initialized for account {}",
            credentials.account_sid
        );

        Ok(Self {
            client,
            credentials,
            base_url: TWILIO_API_BASE.to_string(),
        })
    }

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// URL of the messages collection for the configured account
    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.credentials.account_sid
        )
    }
}

#[async_trait]
impl MessageSender for TwilioSender {
    async fn send(&self, to: &str, from: &str, body: &str) -> Result<(), SendError> {
        debug!("POST {} for {}", self.messages_url(), mask_phone_number(to));

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TwilioErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            error!(
                "Twilio rejected message to {}: {} {}",
                mask_phone_number(to),
                status,
                message
            );
            return Err(SendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        // Accepted from here on; a body without a SID is only logged
        match response.json::<MessageResource>().await {
            Ok(resource) => info!(
                "Message queued for {} with SID {}",
                mask_phone_number(to),
                resource.sid
            ),
            Err(err) => warn!(
                "Message to {} accepted with status {} but response was unreadable: {}",
                mask_phone_number(to),
                status,
                err
            ),
        }

        Ok(())
    }

    fn provider_name(&self) -> &str {
        "twilio"
    }
}
