//! Configuration loader with layered sources.

use crate::{ConfigValidator, ListwireConfig};
use config::{Config, ConfigError, Environment, File};
use listwire_core::ListwireError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads [`ListwireConfig`] from a configuration directory and the
/// environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: Option<String>,
    read_process_env: bool,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{dir}/default.toml` - Default values
    /// 2. `{dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{dir}/local.toml` - Local overrides
    /// 4. Environment variables with `LISTWIRE__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            environment: None,
            read_process_env: true,
        }
    }

    /// Loader for the default location (`./config`).
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment name instead of reading `LISTWIRE_ENVIRONMENT`.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Reads only the configuration files: no `.env`, no `LISTWIRE__*`
    /// variables and no `LISTWIRE_ENVIRONMENT`.
    #[must_use]
    pub fn without_process_env(mut self) -> Self {
        self.read_process_env = false;
        self
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<ListwireConfig, ListwireError> {
        if self.read_process_env {
            // Load .env file if present
            if let Err(e) = dotenvy::dotenv() {
                debug!("No .env file found or error loading it: {}", e);
            }
        }

        let environment = self.environment.clone().unwrap_or_else(|| {
            self.read_process_env
                .then(|| std::env::var("LISTWIRE_ENVIRONMENT").ok())
                .flatten()
                .unwrap_or_else(|| "development".to_string())
        });

        info!(
            "Loading configuration for environment: {} from {}",
            environment,
            self.config_dir.display()
        );

        let mut builder = Config::builder()
            .set_default("app.environment", environment.as_str())
            .map_err(config_error)?;

        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        if self.read_process_env {
            builder = builder.add_source(
                Environment::with_prefix("LISTWIRE")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: ListwireConfig = builder
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)?;

        ConfigValidator::validate(&config).map_err(|errors| {
            let joined = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
            ListwireError::Configuration(joined)
        })?;

        Ok(config)
    }

    /// Returns the configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

fn config_error(err: ConfigError) -> ListwireError {
    ListwireError::Configuration(err.to_string())
}
