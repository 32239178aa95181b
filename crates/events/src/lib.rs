//! Booking notification dispatch.
//!
//! - [`DispatchCore`] — decides whether a booking event warrants a push
//!   notification, resolves the recipient and makes a single send attempt.
//! - [`NotificationKind`] — per-trigger field extraction and payload templates.
//! - [`EventBus`] — in-process publish/subscribe hub for [`BookingEvent`]s.
//! - [`Dispatcher`] — background task feeding bus events to the core.
//! - [`delivery`] — push senders (FCM HTTP v1, log-only).
//!
//! [`BookingEvent`]: booking_core::booking::BookingEvent

pub mod bus;
pub mod delivery;
pub mod dispatch;
pub mod dispatcher;
pub mod kind;

pub use bus::EventBus;
pub use delivery::fcm::{FcmConfig, FcmSender};
pub use delivery::log_only::LogOnlySender;
pub use dispatch::DispatchCore;
pub use dispatcher::Dispatcher;
pub use kind::NotificationKind;
