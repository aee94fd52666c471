//! Configuration loader
//!
//! Loads configuration from an optional `.env` file and the process
//! environment, then validates it. Validation failure is terminal: the
//! server must not come up with a partial configuration.

use std::path::{Path, PathBuf};

use super::dto::ServerConfigDto;
use super::error::{ConfigError, Result};
use super::validator::validate_server_config;

/// Configuration loader
///
/// # Example
///
/// ```
/// use ordex_shared::config::ConfigLoader;
///
/// // Without .env file
/// let loader = ConfigLoader::new(None);
///
/// // With .env file
/// let loader = ConfigLoader::new(Some(".env".into()));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Optional path to .env file
    env_file_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new ConfigLoader
    pub fn new(env_file_path: Option<PathBuf>) -> Self {
        Self { env_file_path }
    }

    /// Load and validate the server configuration.
    pub fn load_server_config(&self) -> Result<ServerConfigDto> {
        if let Some(path) = &self.env_file_path {
            self.load_env_file(path)?;
        }

        let config = ServerConfigDto::from_env()?;
        validate_server_config(&config)?;

        Ok(config)
    }

    fn load_env_file(&self, path: &Path) -> Result<()> {
        // A missing .env file is not an error; containers and CI populate
        // the environment directly.
        if !path.exists() {
            return Ok(());
        }

        dotenv::from_path(path)
            .map(|_| ())
            .map_err(|source| ConfigError::EnvFileLoad {
                path: path.to_path_buf(),
                source,
            })
    }
}
