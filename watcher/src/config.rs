use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CATALOG_URL: &str =
    "https://services.rappi.com.ar/api/web-gateway/web/restaurants-bus/products/toppings/114636/2113564293/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_INTERVAL_MINUTES: u64 = 15;
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// What the poller is looking for inside the catalog response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    /// Category description, matched exactly (case-sensitive)
    pub category: String,
    /// Placeholder option meaning "no product", matched case-insensitively
    pub sentinel: String,
}

impl Default for WatchTarget {
    fn default() -> Self {
        Self {
            category: "Auto f1".to_string(),
            sentinel: "sin auto".to_string(),
        }
    }
}

/// Immutable watcher settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub catalog_url: String,
    /// Sent verbatim as the `authorization` header
    pub auth_token: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub telegram_api_url: String,
    pub interval_minutes: u64,
    pub request_timeout: Duration,
    pub target: WatchTarget,
}

impl WatchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    ///
    /// Required keys are checked in a fixed order and the first missing one
    /// is reported. Optional numeric keys fall back to their defaults when
    /// absent, unparsable, zero or above their ceiling.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let bounded = |key: &str, default: u64, max: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| (1..=max).contains(v))
                .unwrap_or(default)
        };

        let auth_token = required("RAPPI_AUTH_TOKEN")?;
        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        Ok(Self {
            catalog_url: lookup("CATALOG_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            auth_token,
            telegram_bot_token,
            telegram_chat_id,
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            interval_minutes: bounded(
                "CHECK_INTERVAL_MINUTES",
                DEFAULT_INTERVAL_MINUTES,
                MAX_INTERVAL_MINUTES,
            ),
            request_timeout: Duration::from_secs(bounded(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
                MAX_REQUEST_TIMEOUT_SECS,
            )),
            target: WatchTarget::default(),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}
