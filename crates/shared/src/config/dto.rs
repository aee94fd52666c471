//! Configuration data transfer objects

use super::error::{ConfigError, Result};

/// Environment variable holding the token signing secret.
pub const ENV_JWT_SECRET: &str = "JWT_SECRET_KEY";
/// Environment variable overriding the HTTP bind address.
pub const ENV_HTTP_ADDR: &str = "HTTP_ADDR";

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

/// Server configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfigDto {
    /// Address the HTTP server binds to
    pub http_addr: String,
    /// Symmetric secret used to sign and verify credentials
    pub jwt_secret: String,
}

impl ServerConfigDto {
    /// Build the configuration from process environment variables.
    ///
    /// `JWT_SECRET_KEY` is required: serving requests without a signing
    /// secret is a fatal startup condition, not a per-request error.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var(ENV_JWT_SECRET).map_err(|_| {
            ConfigError::MissingRequired {
                var: ENV_JWT_SECRET.to_string(),
            }
        })?;

        let http_addr =
            std::env::var(ENV_HTTP_ADDR).unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_string());

        Ok(Self {
            http_addr,
            jwt_secret,
        })
    }
}
