//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, Environment, File};
use palaver_core::PalaverError;
use std::path::Path;
use tracing::{debug, info};

/// Configuration loader.
///
/// Configuration is loaded from multiple sources in order:
/// 1. `config/default.toml` - Default values
/// 2. `config/{environment}.toml` - Environment-specific overrides
/// 3. Environment variables with `PALAVER_` prefix
#[derive(Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader reading from `config_dir`.
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, PalaverError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, PalaverError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, PalaverError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("PALAVER_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("PALAVER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| PalaverError::Configuration(format!("Failed to build config: {}", e)))?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| PalaverError::Configuration(format!("Failed to parse config: {}", e)))?;

        app_config.app.environment = environment;
        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_falls_back_to_defaults() {
        // A directory with no config files yields the built-in defaults.
        let loader = ConfigLoader::new("./definitely-missing-config-dir").unwrap();
        let config = loader.get();
        assert_eq!(config.app.name, "palaver");
        assert_eq!(config.server.port, 3000);
    }
}
