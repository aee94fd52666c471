pub mod config;
pub mod realtime;

pub use config::{ConfigError, ConfigLoader, ServerConfigDto};
pub use realtime::OrderNotification;
