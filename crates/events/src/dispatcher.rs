//! Background task that feeds bus events to the dispatch core.
//!
//! [`Dispatcher`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! spawns one dispatch per event so slow sends never hold up other bookings.
//! On shutdown it dispatches whatever is still queued on the bus, then waits
//! for in-flight dispatches.

use std::sync::Arc;

use booking_core::booking::BookingEvent;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::dispatch::DispatchCore;

/// Drives [`DispatchCore`] from a broadcast receiver.
pub struct Dispatcher {
    core: Arc<DispatchCore>,
    tasks: TaskTracker,
}

impl Dispatcher {
    pub fn new(core: Arc<DispatchCore>) -> Self {
        Self {
            core,
            tasks: TaskTracker::new(),
        }
    }

    /// Run the dispatch loop.
    ///
    /// Exits when the bus is dropped or `cancel` fires, then waits for every
    /// spawned dispatch to finish. Events already queued when `cancel` fires
    /// are still dispatched.
    pub async fn run(
        self,
        mut receiver: broadcast::Receiver<BookingEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let queued = self.drain_queued(&mut receiver);
                    tracing::info!(queued, "Dispatcher cancelled");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => self.spawn_dispatch(event),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Dispatcher lagged, booking events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, dispatcher shutting down");
                        break;
                    }
                },
            }
        }

        self.tasks.close();
        tracing::info!(in_flight = self.tasks.len(), "Waiting for in-flight dispatches");
        self.tasks.wait().await;
    }

    /// Spawn a dispatch for every event still buffered in `receiver`.
    fn drain_queued(&self, receiver: &mut broadcast::Receiver<BookingEvent>) -> usize {
        let mut queued = 0;
        loop {
            match receiver.try_recv() {
                Ok(event) => {
                    self.spawn_dispatch(event);
                    queued += 1;
                }
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Dispatcher lagged, booking events dropped");
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return queued,
            }
        }
    }

    fn spawn_dispatch(&self, event: BookingEvent) {
        let core = Arc::clone(&self.core);
        self.tasks.spawn(async move {
            let outcome = core.handle(&event).await;
            tracing::debug!(
                booking_id = %event.document_id(),
                delivered = outcome.is_delivered(),
                skipped = outcome.is_skipped(),
                "Booking event handled"
            );
        });
    }
}
