//! Configuration for the sync core
//!
//! Environment-based configuration with defaults and validation.

use crate::core_sync::batching::MEMBER_BATCH_LIMIT;
use serde::{Deserialize, Serialize};
use std::env;

mod error;

pub use error::ConfigError;

/// Sync core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum users submitted per member-join request
    pub member_batch_limit: usize,

    /// Page size requested from the remote catalog; the remote may return
    /// fewer and reports its own has-more flag
    pub catalog_page_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            member_batch_limit: MEMBER_BATCH_LIMIT,
            catalog_page_size: 100,
        }
    }
}

impl SyncConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for unset values
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(limit) = env::var("ROOMSYNC_MEMBER_BATCH_LIMIT") {
            config.member_batch_limit = limit.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid member batch limit: {}", e))
            })?;
        }
        if let Ok(size) = env::var("ROOMSYNC_CATALOG_PAGE_SIZE") {
            config.catalog_page_size = size.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid catalog page size: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.member_batch_limit == 0 {
            return Err(ConfigError::ValidationFailed(
                "member_batch_limit must be greater than 0".to_string(),
            ));
        }
        if self.catalog_page_size == 0 {
            return Err(ConfigError::ValidationFailed(
                "catalog_page_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.member_batch_limit, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_limit_rejected() {
        let config = SyncConfig {
            member_batch_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = SyncConfig {
            catalog_page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
