//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] carries [`BookingEvent`]s from the ingress to the
//! [`Dispatcher`](crate::dispatcher::Dispatcher). It is designed to be shared
//! via `Arc<EventBus>` across the application.

use booking_core::booking::BookingEvent;
use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use booking_core::booking::{BookingEvent, CreationEvent};
/// use booking_events::bus::EventBus;
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// let event = CreationEvent::new("b1", Default::default()).unwrap();
/// bus.publish(BookingEvent::Created(event));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<BookingEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it. With zero
    /// subscribers the event is dropped.
    pub fn publish(&self, event: BookingEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
