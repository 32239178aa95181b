//! Domain types and collaborator contracts for booking notifications.
//!
//! - [`booking`] — booking change/creation events and document field helpers.
//! - [`notification`] — payloads, delivery outcomes and the error taxonomy.
//! - [`recipient`] — the [`RecipientResolver`](recipient::RecipientResolver) seam.
//! - [`push`] — the [`PushSender`](push::PushSender) seam.

pub mod booking;
pub mod error;
pub mod notification;
pub mod push;
pub mod recipient;
pub mod types;
