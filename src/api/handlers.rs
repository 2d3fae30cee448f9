//! API Handlers
//!
//! HTTP request handlers for each verification endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::config::{Config, SmsProvider};
use crate::error::{AppError, Result};
use crate::models::{
    CodeRequest, CodeResponse, HealthResponse, PhoneResponse, ResetRequest, VerifyRequest,
};
use crate::sms::{ConsoleSender, MessageSender, SendError, TwilioSender};
use crate::verify::VerificationManager;

const EXPECTED_JSON: &str = "POST data was expected to be JSON";
const SECRET_MISMATCH: &str = "The client_secret parameter does not match";
const VERIFY_REFUSED: &str = "Unable to validate code for this phone number";
const RESET_REFUSED: &str = "Unable to reset code for this phone number";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Verification manager owning all outstanding codes
    pub manager: Arc<VerificationManager>,
    /// Secret clients must present with every call
    pub client_secret: Arc<str>,
}

impl AppState {
    /// Creates a new AppState around the given manager.
    pub fn new(manager: VerificationManager, client_secret: impl Into<String>) -> Self {
        Self {
            manager: Arc::new(manager),
            client_secret: Arc::from(client_secret.into()),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the configured message sender and a manager on top of it.
    pub fn from_config(config: &Config) -> std::result::Result<Self, SendError> {
        let sender: Arc<dyn MessageSender> = match &config.provider {
            SmsProvider::Twilio(credentials) => Arc::new(TwilioSender::new(
                credentials.clone(),
                Duration::from_secs(config.sms_request_timeout),
            )?),
            SmsProvider::Console => Arc::new(ConsoleSender::new()),
        };

        let manager =
            VerificationManager::new(sender, &config.sending_phone_number, &config.app_hash);
        Ok(Self::new(manager, &config.client_secret))
    }

    /// Fails unless `secret` is a string equal to the configured client secret.
    fn check_secret(&self, secret: &Value) -> Result<()> {
        if secret.as_str() != Some(&*self.client_secret) {
            warn!("Rejected request with mismatching client_secret");
            return Err(AppError::InvalidRequest(SECRET_MISMATCH.to_string()));
        }
        Ok(())
    }
}

/// Unwraps a JSON body into `T`.
///
/// Anything that is not a non-empty JSON object is rejected with a uniform
/// message, including rejections from the extractor itself.
fn json_body<T: DeserializeOwned>(
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<T> {
    let expected_json = || AppError::InvalidRequest(EXPECTED_JSON.to_string());

    let body = match payload {
        Ok(Json(body)) if body.as_object().is_some_and(|fields| !fields.is_empty()) => body,
        _ => return Err(expected_json()),
    };
    serde_json::from_value(body).map_err(|_| expected_json())
}

/// Takes the string out of a field that must hold text.
fn text_field(value: Value, name: &str) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        _ => Err(AppError::InvalidRequest(format!(
            "The {} parameter must be a string",
            name
        ))),
    }
}

/// Handler for POST /api/request
///
/// Sends a one-time code to the phone number.
pub async fn request_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CodeResponse>> {
    let (secret, phone) = json_body::<CodeRequest>(payload)?
        .validate()
        .map_err(AppError::InvalidRequest)?;
    state.check_secret(&secret)?;
    let phone = text_field(phone, "phone")?;

    let time = state.manager.request(&phone).await?;

    Ok(Json(CodeResponse::new(time)))
}

/// Handler for POST /api/verify
///
/// Checks the SMS text the client received against the issued code.
pub async fn verify_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PhoneResponse>> {
    let (secret, phone, sms_message) = json_body::<VerifyRequest>(payload)?
        .validate()
        .map_err(AppError::InvalidRequest)?;
    state.check_secret(&secret)?;
    let phone = text_field(phone, "phone")?;
    let sms_message = text_field(sms_message, "sms_message")?;

    if state.manager.verify(&phone, &sms_message).await {
        Ok(Json(PhoneResponse::confirmed(phone)))
    } else {
        Ok(Json(PhoneResponse::refused(VERIFY_REFUSED)))
    }
}

/// Handler for POST /api/reset
///
/// Discards the outstanding code for the phone number.
pub async fn reset_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PhoneResponse>> {
    let (secret, phone) = json_body::<ResetRequest>(payload)?
        .validate()
        .map_err(AppError::InvalidRequest)?;
    state.check_secret(&secret)?;
    let phone = text_field(phone, "phone")?;

    if state.manager.reset(&phone).await {
        Ok(Json(PhoneResponse::confirmed(phone)))
    } else {
        Ok(Json(PhoneResponse::refused(RESET_REFUSED)))
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.manager.provider_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PHONE: &str = "+15550005555";

    fn fixed_code() -> u32 {
        123456
    }

    fn test_state() -> AppState {
        let sender = Arc::new(ConsoleSender::new());
        let manager = VerificationManager::new(sender, "+15550421337", "fake")
            .with_code_generator(fixed_code);
        AppState::new(manager, "secret")
    }

    fn body(value: Value) -> std::result::Result<Json<Value>, JsonRejection> {
        Ok(Json(value))
    }

    fn code_request(secret: &str) -> std::result::Result<Json<Value>, JsonRejection> {
        body(json!({"client_secret": secret, "phone": PHONE}))
    }

    fn verify_request(message: &str) -> std::result::Result<Json<Value>, JsonRejection> {
        body(json!({"client_secret": "secret", "phone": PHONE, "sms_message": message}))
    }

    fn assert_invalid<T: std::fmt::Debug>(result: Result<T>, expected: &str) {
        match result {
            Err(AppError::InvalidRequest(msg)) => assert_eq!(msg, expected),
            other => panic!("expected invalid request, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_then_verify() {
        let state = test_state();

        let response = request_handler(State(state.clone()), code_request("secret"))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.time, 900);

        let response = verify_handler(State(state.clone()), verify_request("code 123456"))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.phone.as_deref(), Some(PHONE));
    }

    #[tokio::test]
    async fn test_verify_wrong_code() {
        let state = test_state();
        request_handler(State(state.clone()), code_request("secret"))
            .await
            .unwrap();

        let response = verify_handler(State(state), verify_request("code 000000"))
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some(VERIFY_REFUSED));
    }

    #[tokio::test]
    async fn test_request_with_wrong_secret() {
        let state = test_state();

        let result = request_handler(State(state.clone()), code_request("lol")).await;
        assert_invalid(result, SECRET_MISMATCH);
        assert!(!state.manager.verify(PHONE, "123456").await);
    }

    #[tokio::test]
    async fn test_non_string_secret_does_not_match() {
        let state = test_state();

        let result = request_handler(
            State(state.clone()),
            body(json!({"client_secret": 42, "phone": PHONE})),
        )
        .await;
        assert_invalid(result, SECRET_MISMATCH);

        let result = reset_handler(
            State(state),
            body(json!({"client_secret": ["secret"], "phone": PHONE})),
        )
        .await;
        assert_invalid(result, SECRET_MISMATCH);
    }

    #[tokio::test]
    async fn test_empty_or_non_object_body_is_not_json() {
        let state = test_state();

        for value in [json!({}), json!([]), json!("secret"), json!(null), json!(17)] {
            let result = request_handler(State(state.clone()), body(value.clone())).await;
            assert_invalid(result, EXPECTED_JSON);

            let result = verify_handler(State(state.clone()), body(value.clone())).await;
            assert_invalid(result, EXPECTED_JSON);

            let result = reset_handler(State(state.clone()), body(value)).await;
            assert_invalid(result, EXPECTED_JSON);
        }
    }

    #[tokio::test]
    async fn test_unrelated_fields_are_missing_fields() {
        let result = request_handler(State(test_state()), body(json!({"foo": "bar"}))).await;
        assert_invalid(result, "Both client_secret and phone are required.");
    }

    #[tokio::test]
    async fn test_non_string_phone_is_rejected() {
        let state = test_state();

        let result = request_handler(
            State(state.clone()),
            body(json!({"client_secret": "secret", "phone": 15550005555u64})),
        )
        .await;
        assert_invalid(result, "The phone parameter must be a string");
        assert_eq!(state.manager.stored_codes().await, 0);

        let result = verify_handler(
            State(state),
            body(json!({"client_secret": "secret", "phone": PHONE, "sms_message": 123456})),
        )
        .await;
        assert_invalid(result, "The sms_message parameter must be a string");
    }

    #[tokio::test]
    async fn test_reset_handler() {
        let state = test_state();
        let reset = || body(json!({"client_secret": "secret", "phone": PHONE}));

        let response = reset_handler(State(state.clone()), reset()).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some(RESET_REFUSED));

        request_handler(State(state.clone()), code_request("secret"))
            .await
            .unwrap();
        let response = reset_handler(State(state), reset()).await.unwrap();
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(test_state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.provider, "console");
    }
}
