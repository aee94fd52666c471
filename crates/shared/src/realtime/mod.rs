//! Shared types for the realtime push protocol.

pub mod messages;

pub use messages::OrderNotification;
