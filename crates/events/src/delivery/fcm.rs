//! Firebase Cloud Messaging (HTTP v1) push delivery.
//!
//! [`FcmSender`] posts one `messages:send` request per notification. There is
//! no retry: a failed attempt is reported to the caller and the event is
//! considered handled.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use booking_core::notification::NotificationPayload;
use booking_core::push::{PushError, PushSender};
use serde::{Deserialize, Serialize};

use crate::delivery::auth::{
    AccessTokenSource, FcmAuthError, ServiceAccountKey, ServiceAccountTokenSource,
};

/// Public FCM endpoint.
pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com";

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// FcmConfig
// ---------------------------------------------------------------------------

/// Configuration for FCM delivery.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// Path to the service-account key JSON.
    pub credentials_file: PathBuf,
    /// Firebase project; defaults to the key's `project_id`.
    pub project_id: Option<String>,
    /// API base URL (defaults to [`DEFAULT_FCM_ENDPOINT`]).
    pub endpoint: String,
    /// Ask FCM to validate messages without delivering them.
    pub dry_run: bool,
}

impl FcmConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `FCM_CREDENTIALS_FILE` is not set, signalling that
    /// push delivery is not configured.
    ///
    /// | Variable               | Required | Default                      |
    /// |------------------------|----------|------------------------------|
    /// | `FCM_CREDENTIALS_FILE` | yes      | —                            |
    /// | `FCM_PROJECT_ID`       | no       | key's `project_id`           |
    /// | `FCM_ENDPOINT`         | no       | `https://fcm.googleapis.com` |
    /// | `FCM_DRY_RUN`          | no       | `false`                      |
    pub fn from_env() -> Option<Self> {
        let credentials_file = std::env::var("FCM_CREDENTIALS_FILE").ok()?;
        Some(Self {
            credentials_file: PathBuf::from(credentials_file),
            project_id: std::env::var("FCM_PROJECT_ID").ok(),
            endpoint: std::env::var("FCM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_FCM_ENDPOINT.to_string()),
            dry_run: std::env::var("FCM_DRY_RUN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    #[serde(skip_serializing_if = "is_false")]
    validate_only: bool,
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    token: &'a str,
    notification: Notification<'a>,
    data: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    /// `projects/{project}/messages/{id}`
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "errorCode")]
    error_code: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Condense an FCM error response into `CODE: message`.
///
/// Prefers the FCM-specific `errorCode` (e.g. `UNREGISTERED`) over the
/// generic RPC status; falls back to the raw body when it is not JSON.
fn describe_error(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => {
            let code = error
                .details
                .iter()
                .find_map(|d| d.error_code.clone())
                .unwrap_or(error.status);
            if code.is_empty() {
                error.message
            } else {
                format!("{code}: {}", error.message)
            }
        }
        Err(_) => body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// FcmSender
// ---------------------------------------------------------------------------

/// Delivers notifications through the FCM HTTP v1 API.
pub struct FcmSender {
    client: reqwest::Client,
    send_url: String,
    dry_run: bool,
    tokens: Arc<dyn AccessTokenSource>,
}

impl FcmSender {
    pub fn new(
        endpoint: &str,
        project_id: &str,
        dry_run: bool,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Result<Self, FcmAuthError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let send_url = format!(
            "{}/v1/projects/{project_id}/messages:send",
            endpoint.trim_end_matches('/')
        );
        Ok(Self {
            client,
            send_url,
            dry_run,
            tokens,
        })
    }

    /// Build a sender from configuration, loading the service-account key.
    pub fn from_config(config: &FcmConfig) -> Result<Self, FcmAuthError> {
        let key = ServiceAccountKey::from_file(&config.credentials_file)?;
        let project_id = config
            .project_id
            .clone()
            .or_else(|| key.project_id.clone())
            .ok_or(FcmAuthError::MissingProjectId)?;
        let tokens = Arc::new(ServiceAccountTokenSource::new(key)?);

        tracing::info!(
            project_id = %project_id,
            endpoint = %config.endpoint,
            dry_run = config.dry_run,
            "FCM delivery configured"
        );
        Self::new(&config.endpoint, &project_id, config.dry_run, tokens)
    }

    pub fn send_url(&self) -> &str {
        &self.send_url
    }
}

#[async_trait]
impl PushSender for FcmSender {
    async fn send(&self, token: &str, payload: &NotificationPayload) -> Result<String, PushError> {
        let bearer = self
            .tokens
            .access_token()
            .await
            .map_err(|e| PushError::Auth(e.to_string()))?;

        let request = SendRequest {
            validate_only: self.dry_run,
            message: Message {
                token,
                notification: Notification {
                    title: &payload.title,
                    body: &payload.body,
                },
                data: &payload.data,
            },
        };

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(bearer)
            .json(&request)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Rejected {
                status: status.as_u16(),
                message: describe_error(&body),
            });
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;
        Ok(sent.name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
