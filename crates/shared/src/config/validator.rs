//! Configuration validation

use std::net::SocketAddr;

use super::dto::ServerConfigDto;
use super::error::{ConfigError, Result};

/// Validate a loaded server configuration.
///
/// An empty signing secret is rejected here so the failure surfaces at
/// startup rather than on the first credential operation.
pub fn validate_server_config(config: &ServerConfigDto) -> Result<()> {
    if config.jwt_secret.trim().is_empty() {
        return Err(ConfigError::Validation(
            "JWT_SECRET_KEY must not be empty".to_string(),
        ));
    }

    config
        .http_addr
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::InvalidSocketAddr(config.http_addr.clone()))?;

    Ok(())
}
