//! Registry of live push-subscriber connections.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::debug;

/// Capacity of each subscriber's outbound channel. A subscriber that
/// falls this far behind starts losing broadcasts
/// ([`SendError::Backpressure`]) instead of stalling the sender.
pub const SUBSCRIBER_CHANNEL_CAPACITY: usize = 64;

pub type SubscriberId = String;

/// Errors surfaced by [`Subscriber::send`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    /// The connection's forward task is gone; the peer is dead.
    #[error("subscriber channel closed")]
    Closed,

    /// The outbound channel is full; the message was dropped for this
    /// subscriber only.
    #[error("subscriber channel full")]
    Backpressure,
}

/// One live push connection.
///
/// The registry owns the entry from `register` until `unregister`. The
/// sender feeds the connection's forward task, which performs the socket
/// write outside any registry lock.
#[derive(Debug)]
pub struct Subscriber {
    id: SubscriberId,
    subject: String,
    tx: mpsc::Sender<String>,
}

impl Subscriber {
    pub fn new(id: SubscriberId, subject: impl Into<String>, tx: mpsc::Sender<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            tx,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Principal the connection authenticated as.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Queue a message for delivery. Never blocks: a full channel is
    /// reported as backpressure, a closed one as a dead peer.
    pub fn send(&self, message: String) -> Result<(), SendError> {
        match self.tx.try_send(message) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(SendError::Backpressure),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SendError::Closed),
        }
    }
}

/// Thread-safe set of currently open push connections.
///
/// Constructed per instance and shared behind an `Arc`; nothing here is
/// process-global, so tests get their own registry. All mutation and
/// iteration goes through one internal lock.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    subscribers: Mutex<HashMap<SubscriberId, Arc<Subscriber>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Add a subscriber to the live set. Re-registering an id replaces
    /// the previous entry; the set never holds duplicates.
    pub fn register(&self, subscriber: Arc<Subscriber>) {
        let id = subscriber.id().to_string();
        self.subscribers.lock().unwrap().insert(id.clone(), subscriber);
        debug!(subscriber_id = %id, "subscriber registered");
    }

    /// Remove a subscriber if present; a no-op otherwise.
    pub fn unregister(&self, id: &str) -> Option<Arc<Subscriber>> {
        let removed = self.subscribers.lock().unwrap().remove(id);
        if removed.is_some() {
            debug!(subscriber_id = %id, "subscriber unregistered");
        }
        removed
    }

    /// Copy of the current member set, taken under the lock and released
    /// before the caller does any I/O on the entries.
    pub fn snapshot(&self) -> Vec<Arc<Subscriber>> {
        self.subscribers.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
