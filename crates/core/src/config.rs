//! Configuration for the scheduling simulator.
//!
//! This module defines the configuration structure used to parameterize a
//! simulator instance. It provides:
//! 1. **Defaults:** Baseline constants (memory capacity, history tail, tick interval).
//! 2. **Structure:** A flat [`Config`] deserializable from JSON.
//! 3. **Enums:** The wait-queue [`AdmissionPolicy`].
//!
//! Use `Config::default()` for the stock 1 GiB machine or [`Config::from_json`]
//! to load a document where every field is optional.

use serde::Deserialize;

use crate::common::{ConfigError, Megabytes};
pub use crate::sched::policy::AdmissionPolicy;

/// Default configuration constants for the simulator.
mod defaults {
    /// Total memory available to processes (1 GiB).
    pub const CAPACITY_MB: u64 = 1024;

    /// Number of finished processes included in a snapshot.
    pub const HISTORY_TAIL: usize = 10;

    /// Wall-clock pause between ticks when a front-end auto-advances (1 second).
    ///
    /// The engine never reads this; it is carried for drivers.
    pub const TICK_INTERVAL_MS: u64 = 1000;
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fixed memory capacity of the pool, in MB.
    #[serde(default = "Config::default_capacity_mb")]
    pub capacity_mb: Megabytes,

    /// How the wait queue is scanned when memory frees up.
    #[serde(default)]
    pub admission: AdmissionPolicy,

    /// How many of the most recently finished processes a snapshot carries.
    #[serde(default = "Config::default_history_tail")]
    pub history_tail: usize,

    /// Pause between automatic ticks for interactive drivers, in milliseconds.
    #[serde(default = "Config::default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Config {
    const fn default_capacity_mb() -> Megabytes {
        defaults::CAPACITY_MB
    }

    const fn default_history_tail() -> usize {
        defaults::HISTORY_TAIL
    }

    const fn default_tick_interval_ms() -> u64 {
        defaults::TICK_INTERVAL_MS
    }

    /// Returns the default configuration with a different memory capacity.
    pub fn with_capacity(capacity_mb: Megabytes) -> Self {
        Self {
            capacity_mb,
            ..Self::default()
        }
    }

    /// Parses a JSON document and validates the result.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a simulator cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity_mb == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.history_tail == 0 {
            return Err(ConfigError::ZeroHistoryTail);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_mb: defaults::CAPACITY_MB,
            admission: AdmissionPolicy::default(),
            history_tail: defaults::HISTORY_TAIL,
            tick_interval_ms: defaults::TICK_INTERVAL_MS,
        }
    }
}
