use std::env;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL};
use crate::http_client::DEFAULT_TIMEOUT_MS;

pub const API_KEY_ENV: &str = "STOCKC_ALPHA_VANTAGE_KEY";
pub const API_KEY_FALLBACK_ENV: &str = "ALPHA_VANTAGE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Runtime settings for the provider adapter, request budget and history cache.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    api_key: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
    pub history_limit: usize,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    pub quota_window: Duration,
    pub quota_limit: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            cache_capacity: DEFAULT_CAPACITY,
            cache_ttl: DEFAULT_TTL,
            quota_window: Duration::from_secs(60),
            quota_limit: 5,
        }
    }
}

impl ServiceConfig {
    /// Defaults plus the API key from the process environment.
    ///
    /// Reads `STOCKC_ALPHA_VANTAGE_KEY`, then `ALPHA_VANTAGE_API_KEY`. Blank
    /// values count as absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`ServiceConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = [API_KEY_ENV, API_KEY_FALLBACK_ENV]
            .into_iter()
            .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()));
        Self::default().with_api_key(api_key)
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit.max(1);
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity.max(1);
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn with_quota(mut self, quota_window: Duration, quota_limit: u32) -> Self {
        self.quota_window = quota_window;
        self.quota_limit = quota_limit.max(1);
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("history_limit", &self.history_limit)
            .field("cache_capacity", &self.cache_capacity)
            .field("cache_ttl", &self.cache_ttl)
            .field("quota_window", &self.quota_window)
            .field("quota_limit", &self.quota_limit)
            .finish()
    }
}
