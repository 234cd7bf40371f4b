//! Scroll behavior configuration.

use feed_core::DEFAULT_SCROLL_THRESHOLD;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_threshold() -> u32 {
    DEFAULT_SCROLL_THRESHOLD
}

/// Rows moved by a single `j` / `k`.
const fn default_step() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScrollConfig {
    /// Rows from the bottom of the document at which the next page loads.
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Rows per line-scroll command.
    #[serde(default = "default_step")]
    pub step: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            step: default_step(),
        }
    }
}

impl ScrollConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::invalid("scroll.step", "must be at least 1"));
        }
        Ok(())
    }
}
