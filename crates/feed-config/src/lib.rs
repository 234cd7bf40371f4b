//! # feed-config
//!
//! Layered configuration loading for postfeed using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`POSTFEED_*` prefix, `__` as separator)
//! 2. Project-level `.postfeed/config.toml`
//! 3. User-level `~/.config/postfeed/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `POSTFEED_API__ENDPOINT` -> `api.endpoint`,
//! `POSTFEED_SCROLL__THRESHOLD` -> `scroll.threshold`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use feed_config::FeedConfig;
//!
//! let config = FeedConfig::load().expect("config");
//! let settings = config.feed_settings().expect("valid settings");
//! println!("{} posts per page from {}", settings.page_size, config.api.endpoint);
//! ```

mod api;
mod display;
mod error;
mod scroll;

pub use api::ApiConfig;
pub use display::DisplayConfig;
pub use error::ConfigError;
pub use scroll::ScrollConfig;

use feed_core::FeedSettings;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding the project-level config file.
pub const PROJECT_DIR: &str = ".postfeed";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl FeedConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env`; the binary loads it before calling this.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate a config from an arbitrary provider chain.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers and tests can merge extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("POSTFEED_").split("__"))
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.scroll.validate()
    }

    /// Page size and scroll threshold for the feed state machine.
    pub fn feed_settings(&self) -> Result<FeedSettings, ConfigError> {
        FeedSettings::new(self.api.page_size, self.scroll.threshold)
            .map_err(|e| ConfigError::invalid("api.page_size", e.to_string()))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("postfeed").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FeedConfig::default();
        assert!(config.validate().is_ok());
        let settings = config.feed_settings().unwrap();
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.threshold, 10);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = FeedConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.api.endpoint, feed_core::DEFAULT_ENDPOINT);
            assert_eq!(config.scroll.step, 3);
            Ok(())
        });
    }

    #[test]
    fn zero_page_size_fails_validation() {
        let mut config = FeedConfig::default();
        config.api.page_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "api.page_size"
        ));
        assert!(config.feed_settings().is_err());
    }
}
