//! Configuration for the ballot index
//!
//! Table capacities are fixed for a store's lifetime, so they are chosen
//! here once and read from environment variables with validation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bucket counts for the registry's keyed stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Buckets in the voter table (default: 200)
    pub voter_capacity: usize,

    /// Buckets in the candidate table (default: 100)
    pub candidate_capacity: usize,

    /// Buckets in the vote table (default: 500)
    pub vote_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            voter_capacity: 200,
            candidate_capacity: 100,
            vote_capacity: 500,
        }
    }
}

impl StoreConfig {
    /// Load store configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let config = Self {
            voter_capacity: Self::capacity_var("VOTER_TABLE_CAPACITY", defaults.voter_capacity)?,
            candidate_capacity: Self::capacity_var(
                "CANDIDATE_TABLE_CAPACITY",
                defaults.candidate_capacity,
            )?,
            vote_capacity: Self::capacity_var("VOTE_TABLE_CAPACITY", defaults.vote_capacity)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            voter_capacity: 16,
            candidate_capacity: 8,
            vote_capacity: 32,
        }
    }

    fn capacity_var(name: &str, default: usize) -> Result<usize> {
        match std::env::var(name) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::internal(format!("Invalid {}: {:?}", name, raw))),
            Err(_) => Ok(default),
        }
    }

    /// Every table needs at least one bucket
    pub fn validate(&self) -> Result<()> {
        for (name, capacity) in [
            ("voter_capacity", self.voter_capacity),
            ("candidate_capacity", self.candidate_capacity),
            ("vote_capacity", self.vote_capacity),
        ] {
            if capacity == 0 {
                return Err(Error::validation(format!("{} must be at least 1", name)));
            }
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub stores: StoreConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        let stores = StoreConfig::from_env()?;

        let logging = LoggingConfig {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        };

        Ok(Self { stores, logging })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            stores: StoreConfig::for_testing(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
