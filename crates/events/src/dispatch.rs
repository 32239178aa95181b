//! The booking notification dispatch core.
//!
//! [`DispatchCore`] turns one booking event into at most one push send. Both
//! triggers share a single resolve → render → send pipeline; they differ only
//! in their trigger condition and in the [`NotificationKind`] they dispatch.
//!
//! Every failure is folded into the returned [`DispatchOutcome`] and logged.
//! Nothing is propagated to the event source, whose acknowledgment must not
//! depend on delivery.

use std::sync::Arc;

use booking_core::booking::{BookingEvent, ChangeEvent, CreationEvent};
use booking_core::notification::{DeliveryOutcome, DispatchOutcome, ErrorKind, SkipReason};
use booking_core::push::PushSender;
use booking_core::recipient::RecipientResolver;
use booking_core::types::Document;

use crate::delivery::log_only::LOG_ONLY_MESSAGE_ID;
use crate::kind::NotificationKind;

/// Stateless decision engine over booking events.
///
/// Holds only its two collaborators, so it can be shared via `Arc` and
/// invoked concurrently.
pub struct DispatchCore {
    resolver: Arc<dyn RecipientResolver>,
    sender: Arc<dyn PushSender>,
}

impl DispatchCore {
    pub fn new(resolver: Arc<dyn RecipientResolver>, sender: Arc<dyn PushSender>) -> Self {
        Self { resolver, sender }
    }

    /// Handle any booking event.
    pub async fn handle(&self, event: &BookingEvent) -> DispatchOutcome {
        match event {
            BookingEvent::Updated(e) => self.on_status_change(e).await,
            BookingEvent::Created(e) => self.on_created(e).await,
        }
    }

    /// Notify the customer when a booking's status changed.
    pub async fn on_status_change(&self, event: &ChangeEvent) -> DispatchOutcome {
        if !event.status_changed() {
            tracing::info!(
                booking_id = %event.document_id,
                "Booking status unchanged, no notification"
            );
            return DispatchOutcome::Skipped(SkipReason::StatusUnchanged);
        }
        self.dispatch(
            NotificationKind::StatusChanged,
            &event.document_id,
            &event.after,
        )
        .await
    }

    /// Notify the vendor when a booking is created.
    pub async fn on_created(&self, event: &CreationEvent) -> DispatchOutcome {
        self.dispatch(NotificationKind::Created, &event.document_id, &event.data)
            .await
    }

    /// Resolve the recipient named in `doc`, render and send once.
    async fn dispatch(
        &self,
        kind: NotificationKind,
        booking_id: &str,
        doc: &Document,
    ) -> DispatchOutcome {
        let Some(user_id) = kind.recipient(doc) else {
            let field = kind.recipient_field();
            tracing::warn!(booking_id, %kind, field, "Recipient field missing, no notification");
            return DispatchOutcome::Skipped(SkipReason::MissingField(field));
        };

        let token = match self.resolve_token(&user_id).await {
            Ok(token) => token,
            Err(reason) => {
                tracing::warn!(
                    booking_id,
                    %kind,
                    user_id = %user_id,
                    reason = %reason,
                    "Recipient has no deliverable token, no notification"
                );
                return DispatchOutcome::Skipped(SkipReason::Unresolved(reason));
            }
        };

        let payload = kind.payload(booking_id, doc);

        match self.sender.send(&token, &payload).await {
            Ok(message_id) if message_id == LOG_ONLY_MESSAGE_ID => {
                tracing::info!(
                    booking_id,
                    %kind,
                    user_id = %user_id,
                    "Push delivery not configured, notification not delivered"
                );
                DispatchOutcome::Attempted(DeliveryOutcome::delivered(message_id))
            }
            Ok(message_id) => {
                tracing::info!(
                    booking_id,
                    %kind,
                    user_id = %user_id,
                    message_id = %message_id,
                    "Push notification sent"
                );
                DispatchOutcome::Attempted(DeliveryOutcome::delivered(message_id))
            }
            Err(e) => {
                tracing::warn!(
                    booking_id,
                    %kind,
                    user_id = %user_id,
                    error = %e,
                    "Push notification delivery failed"
                );
                DispatchOutcome::Attempted(DeliveryOutcome::failed(ErrorKind::DeliveryFailed(
                    e.to_string(),
                )))
            }
        }
    }

    async fn resolve_token(&self, user_id: &str) -> Result<String, ErrorKind> {
        self.resolver
            .lookup(user_id)
            .await
            .map_err(|e| ErrorKind::LookupFailed(e.to_string()))?
            .into_token()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
