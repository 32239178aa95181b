//! Push delivery: hands a payload to a device-addressing service.

use async_trait::async_trait;

use crate::notification::NotificationPayload;

/// Error type for push delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The request never produced a response (network, DNS, timeout).
    #[error("Push transport error: {0}")]
    Transport(String),

    /// Credentials for the push service could not be obtained.
    #[error("Push authentication error: {0}")]
    Auth(String),

    /// The push service answered with a non-2xx status.
    #[error("Push service returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Submits one notification to one device token.
///
/// Returns the message id assigned by the push service.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, token: &str, payload: &NotificationPayload) -> Result<String, PushError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_status_and_message() {
        let err = PushError::Rejected {
            status: 404,
            message: "UNREGISTERED".into(),
        };
        assert_eq!(err.to_string(), "Push service returned HTTP 404: UNREGISTERED");
    }
}
