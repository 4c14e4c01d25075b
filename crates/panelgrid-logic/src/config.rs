//! Tiling configuration and its validation.
//!
//! ```
//! use panelgrid_logic::config::{validate_config, TilingConfig};
//!
//! let config = TilingConfig::default();
//! assert_eq!(config.max_size, 10);
//! assert_eq!(config.scan_cap(), 100);
//! assert!(validate_config(&config).is_empty());
//! ```

use crate::constants::{MAX_TILE_SIZE, MAX_TILE_SIZE_LIMIT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Knobs for a tiling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingConfig {
    /// Largest tile edge along either axis.
    pub max_size: u32,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            max_size: MAX_TILE_SIZE,
        }
    }
}

impl TilingConfig {
    pub fn with_max_size(max_size: u32) -> Self {
        Self { max_size }
    }

    /// Most cells a single connectivity scan will admit.
    pub fn scan_cap(&self) -> usize {
        (self.max_size as usize) * (self.max_size as usize)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero edge would make every tile empty.
    ZeroMaxSize,
    /// Edge above [`MAX_TILE_SIZE_LIMIT`].
    MaxSizeTooLarge(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMaxSize => write!(f, "max_size must be at least 1"),
            ConfigError::MaxSizeTooLarge(n) => {
                write!(f, "max_size {} exceeds limit {}", n, MAX_TILE_SIZE_LIMIT)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a tiling configuration, returning all errors found.
pub fn validate_config(config: &TilingConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if config.max_size == 0 {
        errors.push(ConfigError::ZeroMaxSize);
    }
    if config.max_size > MAX_TILE_SIZE_LIMIT {
        errors.push(ConfigError::MaxSizeTooLarge(config.max_size));
    }
    errors
}
