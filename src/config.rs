//! Configuration Module
//!
//! Loads and validates server configuration from environment variables.
//! Every required value is checked at startup so a misconfigured server
//! never starts.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::sms::TwilioCredentials;

const TWILIO_HINT: &str = "Please copy the .env.example file to .env, and then add your Twilio \
     API Key, API Secret, and Account SID to the .env file. Find them on \
     https://www.twilio.com/console";
const SENDING_PHONE_HINT: &str =
    "Please provide a valid phone number, such as +15125551212, in the .env file";
const APP_HASH_HINT: &str = "Please provide a valid Android app hash, which you can find in the \
     Settings menu item of the Android app, in the .env file";
const CLIENT_SECRET_HINT: &str = "Please provide a secret string to share, between the app and the \
     server in the .env file";

/// SMS provider selection with its credentials.
#[derive(Debug, Clone)]
pub enum SmsProvider {
    /// Deliver through Twilio
    Twilio(TwilioCredentials),
    /// Log messages instead of sending them
    Console,
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider used to deliver codes
    pub provider: SmsProvider,
    /// Originating phone number for outgoing messages
    pub sending_phone_number: String,
    /// Android app hash appended to each message
    pub app_hash: String,
    /// Secret shared between the app and the server
    pub client_secret: String,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout in seconds for provider requests
    pub sms_request_timeout: u64,
    /// Seconds between expired-code sweeps, 0 disables the sweep
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `SMS_PROVIDER` - `twilio` or `console` (default: twilio)
    /// - `TWILIO_ACCOUNT_SID`, `TWILIO_API_KEY`, `TWILIO_API_SECRET` - required for twilio
    /// - `SENDING_PHONE_NUMBER` - required
    /// - `APP_HASH` - required
    /// - `CLIENT_SECRET` - required
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SMS_REQUEST_TIMEOUT` - provider timeout in seconds (default: 10)
    /// - `CACHE_SWEEP_INTERVAL` - sweep interval in seconds (default: 0, disabled)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match optional(&lookup, "SMS_PROVIDER").as_deref() {
            None | Some("twilio") => SmsProvider::Twilio(TwilioCredentials {
                account_sid: required(&lookup, "TWILIO_ACCOUNT_SID", TWILIO_HINT)?,
                api_key: required(&lookup, "TWILIO_API_KEY", TWILIO_HINT)?,
                api_secret: required(&lookup, "TWILIO_API_SECRET", TWILIO_HINT)?,
            }),
            Some("console") => SmsProvider::Console,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "SMS_PROVIDER",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            provider,
            sending_phone_number: required(&lookup, "SENDING_PHONE_NUMBER", SENDING_PHONE_HINT)?,
            app_hash: required(&lookup, "APP_HASH", APP_HASH_HINT)?,
            client_secret: required(&lookup, "CLIENT_SECRET", CLIENT_SECRET_HINT)?,
            server_port: parsed(&lookup, "SERVER_PORT", 3000)?,
            sms_request_timeout: parsed(&lookup, "SMS_REQUEST_TIMEOUT", 10)?,
            sweep_interval: parsed(&lookup, "CACHE_SWEEP_INTERVAL", 0)?,
        })
    }
}

/// Returns the value of `key`, treating an empty value as unset.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &'static str, hint: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing { key, hint })
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match optional(lookup, key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
