//! Connector configuration.
//!
//! Everything here has a working default, so `ConnectorConfig::default()`
//! talks to the production API. The struct derives `Deserialize` so it can be
//! embedded in an application's own config file; `from_env` covers the common
//! case of overriding the endpoint for staging or a local mock. The auth token
//! is deliberately not part of the config and must be passed to the connector.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.wazzupsoftware.com";

pub const ENV_BASE_URL: &str = "WAZZUP_BASE_URL";
pub const ENV_API_VERSION: &str = "WAZZUP_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "WAZZUP_TIMEOUT_SECS";

/// API version embedded in every request path as `{major}/{minor}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self { major: 16, minor: 0 }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    /// Accepts `16/0` as well as `16.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidSetting {
            key: ENV_API_VERSION,
            value: s.to_string(),
        };
        let (major, minor) = s.trim().split_once(['/', '.']).ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub base_url: String,
    pub api_version: ApiVersion,
    /// Upper bound for a whole request, applied by `HttpTransport`.
    pub timeout_secs: Option<u64>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: ApiVersion::default(),
            timeout_secs: None,
        }
    }
}

impl ConnectorConfig {
    /// Defaults overridden by `WAZZUP_BASE_URL`, `WAZZUP_API_VERSION` and
    /// `WAZZUP_TIMEOUT_SECS` when they are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            if base_url.trim().is_empty() {
                return Err(ConfigError::InvalidSetting {
                    key: ENV_BASE_URL,
                    value: base_url,
                });
            }
            config.base_url = base_url;
        }
        if let Some(version) = lookup(ENV_API_VERSION) {
            config.api_version = version.parse()?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSetting {
                    key: ENV_TIMEOUT_SECS,
                    value: timeout.clone(),
                })?;
            config.timeout_secs = Some(secs);
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
