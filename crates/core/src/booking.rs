//! Booking document events delivered by the event source.
//!
//! Events are immutable snapshots. The dispatch core reads them once and never
//! writes back to the source.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::Document;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// Booking lifecycle status (e.g. `"pending"`, `"confirmed"`).
pub const FIELD_STATUS: &str = "status";

/// Id of the customer who made the booking.
pub const FIELD_CUSTOMER_ID: &str = "customerId";

/// Id of the vendor the booking was made with.
pub const FIELD_VENDOR_ID: &str = "vendorId";

/// Human-readable name of the booked service.
pub const FIELD_SERVICE_NAME: &str = "serviceName";

/// Contact email of the customer.
pub const FIELD_CUSTOMER_EMAIL: &str = "customerEmail";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A booking document was updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub document_id: String,
    pub before: Document,
    pub after: Document,
}

impl ChangeEvent {
    /// Build a change event, rejecting a blank document id.
    pub fn new(
        document_id: impl Into<String>,
        before: Document,
        after: Document,
    ) -> Result<Self, CoreError> {
        let document_id = validate_document_id(document_id.into())?;
        Ok(Self {
            document_id,
            before,
            after,
        })
    }

    /// Whether the `status` field differs between the two snapshots.
    ///
    /// A `null` status is treated the same as an absent one, so a field that
    /// is missing on both sides counts as unchanged.
    pub fn status_changed(&self) -> bool {
        present(&self.before, FIELD_STATUS) != present(&self.after, FIELD_STATUS)
    }
}

/// A booking document was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationEvent {
    pub document_id: String,
    pub data: Document,
}

impl CreationEvent {
    /// Build a creation event, rejecting a blank document id.
    pub fn new(document_id: impl Into<String>, data: Document) -> Result<Self, CoreError> {
        let document_id = validate_document_id(document_id.into())?;
        Ok(Self { document_id, data })
    }
}

/// Any event the source can deliver for the `bookings` collection.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    Updated(ChangeEvent),
    Created(CreationEvent),
}

impl BookingEvent {
    pub fn document_id(&self) -> &str {
        match self {
            BookingEvent::Updated(e) => &e.document_id,
            BookingEvent::Created(e) => &e.document_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Read a field as display text.
///
/// Strings are returned as-is; numbers and booleans use their JSON rendering.
/// Absent, `null` and blank-string fields yield `None`.
pub fn field_text(doc: &Document, key: &str) -> Option<String> {
    match present(doc, key)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn present<'a>(doc: &'a Document, key: &str) -> Option<&'a Value> {
    doc.get(key).filter(|v| !v.is_null())
}

fn validate_document_id(id: String) -> Result<String, CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation(
            "document id must not be empty".to_string(),
        ));
    }
    Ok(id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
