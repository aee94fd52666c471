//! Realtime push infrastructure.
//!
//! A [`ConnectionRegistry`] owns the set of live push connections; the
//! [`OrderNotifier`] fans order events out to every member. The registry
//! lock is held only for set mutation or a snapshot copy — the actual
//! socket writes happen in each connection's forward task, so a stalled
//! peer never blocks registration, deregistration, or a broadcast pass.

pub mod notifier;
pub mod registry;

pub use notifier::{BroadcastError, OrderNotifier};
pub use registry::{
    ConnectionRegistry, SUBSCRIBER_CHANNEL_CAPACITY, SendError, Subscriber, SubscriberId,
};
