//! Interface layer: credential codec, authentication gate, WebSocket
//! upgrade handling, and the HTTP record endpoints.

pub mod auth;
pub mod http;
pub mod state;
pub mod websocket;

pub use state::AppState;
