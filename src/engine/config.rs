//! Configuration options for the probability engine.
//!
//! Controls the memo cache bound, the default shoe size used by the
//! binaries, and whether `evaluate_all` reports timings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::deck::MAX_DECKS;

/// Default number of memoized entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 200_000;

/// Configuration for [`ProbabilityEngine`](crate::engine::ProbabilityEngine).
///
/// # Example
/// ```
/// use blackjack_odds::engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.num_decks, 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of memoized query results.
    ///
    /// Once full, the least recently used entry is dropped. Raise this for
    /// large batch runs where memory is provisioned for the whole state
    /// space.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Decks in the reference shoe (1-8).
    #[serde(default = "default_num_decks")]
    pub num_decks: u8,

    /// Emit per-query timings and cache statistics at debug level.
    #[serde(default)]
    pub log_timings: bool,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_num_decks() -> u8 {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            num_decks: 1,
            log_timings: false,
        }
    }
}

impl EngineConfig {
    /// Single-deck game with the default cache.
    pub fn single_deck() -> Self {
        Self::default()
    }

    /// Shoe of `num_decks` decks with the default cache.
    pub fn shoe(num_decks: u8) -> Self {
        Self {
            num_decks,
            ..Default::default()
        }
    }

    /// Effectively unbounded cache, for one-off batch computations over a
    /// known state space (e.g. precomputing a lookup table).
    pub fn unbounded_batch() -> Self {
        Self {
            cache_capacity: usize::MAX,
            ..Default::default()
        }
    }

    /// Builder method: set the cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Builder method: set the number of decks.
    pub fn with_decks(mut self, num_decks: u8) -> Self {
        self.num_decks = num_decks;
        self
    }

    /// Builder method: enable or disable timing logs.
    pub fn with_timings(mut self, enable: bool) -> Self {
        self.log_timings = enable;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        if self.num_decks == 0 || self.num_decks > MAX_DECKS {
            return Err(ConfigError::InvalidDeckCount(self.num_decks));
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Cache capacity of zero disables memoization, which makes the
    /// recursion intractable.
    #[error("cache capacity must be at least 1")]
    ZeroCacheCapacity,

    /// Deck count out of range.
    #[error("deck count {0} is out of range [1, {max}]", max = MAX_DECKS)]
    InvalidDeckCount(u8),
}
