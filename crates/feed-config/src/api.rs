//! Listing endpoint configuration.

use std::time::Duration;

use feed_core::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_endpoint() -> String {
    String::from(DEFAULT_ENDPOINT)
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    String::from("postfeed/0.1")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Listing URL; `_page` and `_limit` are appended to its query.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Posts requested per page (`_limit`).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::invalid("api.endpoint", "must not be empty"));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.endpoint",
                format!("'{endpoint}' is not an http(s) URL"),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::invalid("api.page_size", "must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_listing() {
        let config = ApiConfig::default();
        assert_eq!(config.endpoint, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = ApiConfig {
            endpoint: "file:///tmp/posts.json".to_string(),
            ..ApiConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.endpoint"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
