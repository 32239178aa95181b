//! Notification kinds and their payload templates.
//!
//! Each kind names the document field that addresses the recipient and
//! renders the title, body and data map for its notification.

use std::collections::BTreeMap;

use booking_core::booking::{
    field_text, FIELD_CUSTOMER_EMAIL, FIELD_CUSTOMER_ID, FIELD_SERVICE_NAME, FIELD_STATUS,
    FIELD_VENDOR_ID,
};
use booking_core::notification::{
    NotificationPayload, CLICK_ACTION, DATA_BOOKING_ID, DATA_CLICK_ACTION, DATA_TYPE,
};
use booking_core::types::Document;

/// Placeholder for a missing `serviceName`.
const FALLBACK_SERVICE: &str = "your service";

/// Placeholder for a missing `customerEmail`.
const FALLBACK_CUSTOMER: &str = "a customer";

/// Placeholder for a missing `status` on the updated document.
const FALLBACK_STATUS: &str = "updated";

/// The two booking triggers that produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A booking's status changed; the customer is notified.
    StatusChanged,
    /// A booking was created; the vendor is notified.
    Created,
}

impl NotificationKind {
    /// Value of the `type` data key.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::StatusChanged => "booking_update",
            NotificationKind::Created => "new_booking",
        }
    }

    /// Document field holding the recipient's user id.
    pub fn recipient_field(self) -> &'static str {
        match self {
            NotificationKind::StatusChanged => FIELD_CUSTOMER_ID,
            NotificationKind::Created => FIELD_VENDOR_ID,
        }
    }

    /// Recipient user id taken from the document, if present.
    pub fn recipient(self, doc: &Document) -> Option<String> {
        field_text(doc, self.recipient_field())
    }

    pub fn title(self) -> &'static str {
        match self {
            NotificationKind::StatusChanged => "Booking Status Updated",
            NotificationKind::Created => "New Booking Request",
        }
    }

    fn body(self, doc: &Document) -> String {
        let service = field_text(doc, FIELD_SERVICE_NAME);
        let service = service.as_deref().unwrap_or(FALLBACK_SERVICE);
        match self {
            NotificationKind::StatusChanged => {
                let status = field_text(doc, FIELD_STATUS);
                let status = status.as_deref().unwrap_or(FALLBACK_STATUS);
                format!("Your booking for \"{service}\" has been {status}.")
            }
            NotificationKind::Created => {
                let customer = field_text(doc, FIELD_CUSTOMER_EMAIL);
                let customer = customer.as_deref().unwrap_or(FALLBACK_CUSTOMER);
                format!("You have a new booking request for \"{service}\" from {customer}.")
            }
        }
    }

    /// Render the notification for `doc`, the post-event state of booking
    /// `document_id`.
    pub fn payload(self, document_id: &str, doc: &Document) -> NotificationPayload {
        let data = BTreeMap::from([
            (DATA_BOOKING_ID.to_string(), document_id.to_string()),
            (DATA_TYPE.to_string(), self.as_str().to_string()),
            (DATA_CLICK_ACTION.to_string(), CLICK_ACTION.to_string()),
        ]);
        NotificationPayload {
            title: self.title().to_string(),
            body: self.body(doc),
            data,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn status_changed_payload() {
        let d = doc(json!({"customerId": "u1", "serviceName": "Cleaning", "status": "confirmed"}));
        let payload = NotificationKind::StatusChanged.payload("b1", &d);

        assert_eq!(payload.title, "Booking Status Updated");
        assert_eq!(payload.body, "Your booking for \"Cleaning\" has been confirmed.");
        assert_eq!(payload.data["bookingId"], "b1");
        assert_eq!(payload.data["type"], "booking_update");
        assert_eq!(payload.data["click_action"], "FLUTTER_NOTIFICATION_CLICK");
        assert_eq!(payload.data.len(), 3);
    }

    #[test]
    fn created_payload() {
        let d = doc(json!({
            "vendorId": "v1",
            "serviceName": "Painting",
            "customerEmail": "a@b.com",
        }));
        let payload = NotificationKind::Created.payload("b2", &d);

        assert_eq!(payload.title, "New Booking Request");
        assert_eq!(
            payload.body,
            "You have a new booking request for \"Painting\" from a@b.com."
        );
        assert_eq!(payload.data["bookingId"], "b2");
        assert_eq!(payload.data["type"], "new_booking");
    }

    #[test]
    fn missing_optional_fields_use_fallbacks() {
        let d = doc(json!({"vendorId": "v1"}));
        let payload = NotificationKind::Created.payload("b3", &d);
        assert_eq!(
            payload.body,
            "You have a new booking request for \"your service\" from a customer."
        );

        let d = doc(json!({"customerId": "u1"}));
        let payload = NotificationKind::StatusChanged.payload("b4", &d);
        assert_eq!(payload.body, "Your booking for \"your service\" has been updated.");
    }

    #[test]
    fn recipient_reads_kind_specific_field() {
        let d = doc(json!({"customerId": "u1", "vendorId": "v1"}));
        assert_eq!(NotificationKind::StatusChanged.recipient(&d).as_deref(), Some("u1"));
        assert_eq!(NotificationKind::Created.recipient(&d).as_deref(), Some("v1"));
        assert_eq!(NotificationKind::Created.recipient(&Document::new()), None);
    }
}
