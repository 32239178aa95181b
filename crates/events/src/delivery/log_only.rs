//! Sender that records notifications in the log instead of delivering them.

use async_trait::async_trait;
use booking_core::notification::NotificationPayload;
use booking_core::push::{PushError, PushSender};

/// Message id reported for every logged notification.
pub const LOG_ONLY_MESSAGE_ID: &str = "log-only";

/// Used when FCM credentials are not configured, so events are still
/// acknowledged and their would-be notifications stay visible.
#[derive(Debug, Default)]
pub struct LogOnlySender;

#[async_trait]
impl PushSender for LogOnlySender {
    async fn send(&self, token: &str, payload: &NotificationPayload) -> Result<String, PushError> {
        tracing::info!(
            token,
            title = %payload.title,
            body = %payload.body,
            data = ?payload.data,
            "Push delivery not configured, notification logged only"
        );
        Ok(LOG_ONLY_MESSAGE_ID.to_string())
    }
}
