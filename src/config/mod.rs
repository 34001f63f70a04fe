//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MODERNITY_SURVEY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use modernity_survey::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Retrying saves up to {} times", config.persistence.max_attempts);
//! ```

mod database;
mod error;
mod persistence;
mod runtime;
mod scoring;

pub use database::{DatabaseConfig, MAX_POOL_SIZE};
pub use error::{ConfigError, ValidationError};
pub use persistence::{PersistenceConfig, MAX_ATTEMPTS_LIMIT, MAX_RETRY_DELAY_MS};
pub use runtime::{Environment, RuntimeConfig};
pub use scoring::ScoringConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Runtime configuration (environment, log filter)
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Retry policy for saving submissions
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Question catalogue and template locations
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MODERNITY_SURVEY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MODERNITY_SURVEY__DATABASE__URL=...` -> `database.url = ...`
    /// - `MODERNITY_SURVEY__PERSISTENCE__MAX_ATTEMPTS=5` -> `persistence.max_attempts = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MODERNITY_SURVEY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values, including the database section.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_offline()?;
        self.database.validate()?;
        Ok(())
    }

    /// Validate the sections needed when no database is touched.
    pub fn validate_offline(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.persistence.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
