//! Notification payloads and the outcomes of a dispatch attempt.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Client-side routing marker the mobile app uses to open the booking screen.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// Data key carrying the booking document id.
pub const DATA_BOOKING_ID: &str = "bookingId";

/// Data key carrying the notification kind.
pub const DATA_TYPE: &str = "type";

/// Data key carrying [`CLICK_ACTION`].
pub const DATA_CLICK_ACTION: &str = "click_action";

// ---------------------------------------------------------------------------
// NotificationPayload
// ---------------------------------------------------------------------------

/// A push notification ready to hand to a [`PushSender`](crate::push::PushSender).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    /// String-only key/value pairs delivered to the app alongside the alert.
    pub data: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Why a notification could not be delivered.
///
/// None of these are fatal to the triggering event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("recipient not found")]
    RecipientNotFound,

    #[error("recipient has no delivery token")]
    TokenMissing,

    #[error("recipient lookup failed: {0}")]
    LookupFailed(String),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

// ---------------------------------------------------------------------------
// DeliveryOutcome
// ---------------------------------------------------------------------------

/// Result of the single send attempt made for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub message_id: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl DeliveryOutcome {
    pub fn delivered(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: Some(message_id.into()),
            error_kind: None,
        }
    }

    pub fn failed(error_kind: ErrorKind) -> Self {
        Self {
            success: false,
            message_id: None,
            error_kind: Some(error_kind),
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchOutcome
// ---------------------------------------------------------------------------

/// Why no send was attempted for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The booking status did not change.
    StatusUnchanged,
    /// A field required to address the notification is absent.
    MissingField(&'static str),
    /// The recipient could not be resolved to a delivery token.
    Unresolved(ErrorKind),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::StatusUnchanged => f.write_str("status unchanged"),
            SkipReason::MissingField(field) => write!(f, "missing field `{field}`"),
            SkipReason::Unresolved(kind) => write!(f, "{kind}"),
        }
    }
}

/// Terminal result of handling one booking event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No send was attempted.
    Skipped(SkipReason),
    /// Exactly one send was attempted.
    Attempted(DeliveryOutcome),
}

impl DispatchOutcome {
    /// `true` when a send was attempted and the sender accepted it.
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Attempted(o) if o.success)
    }

    /// `true` when no send was attempted.
    pub fn is_skipped(&self) -> bool {
        matches!(self, DispatchOutcome::Skipped(_))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
