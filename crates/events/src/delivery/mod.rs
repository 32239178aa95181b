//! Push delivery channels.
//!
//! [`fcm::FcmSender`] delivers through Firebase Cloud Messaging using
//! credentials from [`auth`]. [`log_only::LogOnlySender`] stands in when no
//! push service is configured.

pub mod auth;
pub mod fcm;
pub mod log_only;
