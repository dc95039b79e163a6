//! # Pool Configuration
//!
//! Size-class capacities for [`BufferPool`](crate::BufferPool), loadable from
//! TOML at startup.
//!
//! ```toml
//! small_capacity = 256
//! initial_large_capacity = 256
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Capacity of the small size class unless configured otherwise.
pub const DEFAULT_SMALL_CAPACITY: usize = 256;

/// Configuration for a [`BufferPool`](crate::BufferPool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Fixed capacity of every small buffer. Requests up to this size are
    /// served from the small class.
    pub small_capacity: usize,
    /// Capacity of the large class before any larger request raises it.
    pub initial_large_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            small_capacity: DEFAULT_SMALL_CAPACITY,
            initial_large_capacity: DEFAULT_SMALL_CAPACITY,
        }
    }
}

impl PoolConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys fall back to [`PoolConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] if the text is not valid TOML for
    /// this type or fails [`PoolConfig::validate`].
    pub fn from_toml_str(text: &str) -> GridResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GridError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the capacities are usable.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] if `small_capacity` is zero.
    pub fn validate(&self) -> GridResult<()> {
        if self.small_capacity == 0 {
            return Err(GridError::InvalidConfig(
                "small_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
