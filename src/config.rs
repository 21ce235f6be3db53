//! Configuration for the ISAM simulator
//!
//! Centralized configuration with defaults matching the classic
//! three-blocks-of-three layout. Parameters are fixed once a
//! [`Manager`](crate::Manager) is built from them.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IsamError, Result};

/// Main configuration for an ISAM structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Data Area Configuration
    // -------------------------------------------------------------------------
    /// Records per main block (N)
    pub block_capacity: usize,

    /// Maximum number of main blocks that can ever be allocated
    pub max_blocks: usize,

    /// Records the single overflow block can hold
    pub overflow_capacity: usize,

    // -------------------------------------------------------------------------
    // Placement Configuration
    // -------------------------------------------------------------------------
    /// When a block counts as dense enough to stop taking records in place
    pub density: DensityPolicy,
}

/// Fill level at which a main block stops accepting in-place inserts
///
/// A dense block receiving a new maximum key opens a fresh block; a dense
/// block receiving an in-range key diverts it to the overflow block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DensityPolicy {
    /// Dense only when every slot is taken
    #[default]
    Full,

    /// Dense from `ceil((N + 1) / 2)` records on
    HalfFull,
}

impl DensityPolicy {
    /// Record count from which a block of `capacity` slots is dense
    pub fn threshold(self, capacity: usize) -> usize {
        match self {
            DensityPolicy::Full => capacity,
            // ceil((N + 1) / 2) == N / 2 + 1
            DensityPolicy::HalfFull => capacity / 2 + 1,
        }
    }
}

impl fmt::Display for DensityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DensityPolicy::Full => f.write_str("full"),
            DensityPolicy::HalfFull => f.write_str("half-full"),
        }
    }
}

impl FromStr for DensityPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(DensityPolicy::Full),
            "half-full" | "half" => Ok(DensityPolicy::HalfFull),
            other => Err(format!(
                "unknown density policy '{}' (expected 'full' or 'half-full')",
                other
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_capacity: 3,
            max_blocks: 3,
            overflow_capacity: 3,
            density: DensityPolicy::Full,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a config from TOML text; missing fields take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| IsamError::Config(e.to_string()))
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check that every bound is usable
    ///
    /// The manager trusts its config, so callers validate before building one.
    pub fn validate(&self) -> Result<()> {
        if self.block_capacity == 0 {
            return Err(IsamError::Config(
                "block_capacity must be at least 1".to_string(),
            ));
        }
        if self.max_blocks == 0 {
            return Err(IsamError::Config(
                "max_blocks must be at least 1".to_string(),
            ));
        }
        if self.overflow_capacity == 0 {
            return Err(IsamError::Config(
                "overflow_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Record count from which a main block is dense
    pub fn density_threshold(&self) -> usize {
        self.density.threshold(self.block_capacity)
    }

    /// Total records the structure can ever hold
    pub fn total_capacity(&self) -> usize {
        self.block_capacity * self.max_blocks + self.overflow_capacity
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from an existing config instead of the defaults
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the number of records per main block
    pub fn block_capacity(mut self, capacity: usize) -> Self {
        self.config.block_capacity = capacity;
        self
    }

    /// Set the maximum number of main blocks
    pub fn max_blocks(mut self, count: usize) -> Self {
        self.config.max_blocks = count;
        self
    }

    /// Set the overflow block capacity
    pub fn overflow_capacity(mut self, capacity: usize) -> Self {
        self.config.overflow_capacity = capacity;
        self
    }

    /// Set the density policy
    pub fn density(mut self, policy: DensityPolicy) -> Self {
        self.config.density = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
