//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be positive and at least min_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid acquire timeout")]
    InvalidTimeout,

    #[error("Persistence max_attempts must be between 1 and {max}")]
    InvalidMaxAttempts { max: u32 },

    #[error("Persistence retry_delay_ms exceeds maximum allowed ({max})")]
    RetryDelayTooLarge { max: u64 },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
