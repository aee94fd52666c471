//! WebSocket push channel.
//!
//! Flow per connection: the authentication gate (route layer) validates
//! the `token` query parameter before any handshake side effect; the
//! handler then upgrades, registers the subscriber, and holds the
//! connection until the peer disconnects or a read fails. Outbound
//! traffic arrives exclusively via the broadcast notifier — the handler
//! itself never originates messages.

mod handler;

pub use handler::ws_handler;
