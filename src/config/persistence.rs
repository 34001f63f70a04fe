//! Persistence retry configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on attempts per save.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Upper bound on the delay between attempts, in milliseconds.
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Retry settings for the persistence gateway
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Total attempts per save, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl PersistenceConfig {
    /// Get retry delay as Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Validate persistence configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 || self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(ValidationError::InvalidMaxAttempts {
                max: MAX_ATTEMPTS_LIMIT,
            });
        }
        if self.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(ValidationError::RetryDelayTooLarge {
                max: MAX_RETRY_DELAY_MS,
            });
        }
        Ok(())
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}
