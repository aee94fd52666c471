//! Broadcast fan-out for order notifications.

use std::sync::Arc;

use ordex_shared::realtime::OrderNotification;
use tracing::{debug, warn};

use crate::realtime::registry::{ConnectionRegistry, SendError};

/// Outcome of a degraded broadcast pass.
///
/// These are telemetry for the caller: a failed delivery never aborts the
/// pass, and the order-creation trigger treats every variant as non-fatal.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("all {0} deliveries failed")]
    AllDeliveriesFailed(usize),

    #[error("partial broadcast: {failed} failed of {total} total")]
    Partial { failed: usize, total: usize },
}

/// Fans an order event out to every currently registered subscriber.
///
/// Best-effort, at-most-once: no acknowledgement, no persistence, no
/// replay. Subscribers not connected at snapshot time miss the event.
#[derive(Debug, Clone)]
pub struct OrderNotifier {
    registry: Arc<ConnectionRegistry>,
}

impl OrderNotifier {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Serialize the event once, then attempt delivery to every
    /// subscriber in the snapshot. A subscriber whose channel is closed
    /// is a dead peer: it is removed from the registry and the remaining
    /// deliveries proceed regardless.
    ///
    /// Returns the number of successful deliveries; an empty registry is
    /// `Ok(0)`.
    pub fn notify(&self, event: &OrderNotification) -> Result<usize, BroadcastError> {
        let message = serde_json::to_string(event)?;

        let targets = self.registry.snapshot();
        let total = targets.len();
        let mut delivered = 0usize;

        for subscriber in targets {
            match subscriber.send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(SendError::Closed) => {
                    warn!(subscriber_id = %subscriber.id(), "dropping dead subscriber during broadcast");
                    self.registry.unregister(subscriber.id());
                }
                Err(SendError::Backpressure) => {
                    warn!(subscriber_id = %subscriber.id(), "subscriber lagging, notification dropped");
                }
            }
        }

        let failed = total - delivered;
        if failed == 0 {
            debug!(order_id = %event.order_id, delivered, "order notification broadcast");
            Ok(delivered)
        } else if delivered == 0 {
            Err(BroadcastError::AllDeliveriesFailed(total))
        } else {
            Err(BroadcastError::Partial { failed, total })
        }
    }
}
