//! Startup configuration.

use std::path::PathBuf;

use ordex_shared::config::{ConfigError, ConfigLoader, ServerConfigDto};

/// Resolve the server configuration from `.env` (if present) and the
/// process environment, then apply CLI overrides.
pub fn load(port_override: Option<u16>) -> Result<ServerConfigDto, ConfigError> {
    let loader = ConfigLoader::new(Some(PathBuf::from(".env")));
    let mut config = loader.load_server_config()?;

    if let Some(port) = port_override {
        let host = config
            .http_addr
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.http_addr = format!("{host}:{port}");
    }

    Ok(config)
}
