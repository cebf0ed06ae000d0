//! Runtime configuration read from the environment.

use std::time::Duration;

use comparcar_api::Client;

use crate::cache::MemoryCache;
use crate::client::CachedClient;

pub const API_URL_VAR: &str = "COMPARCAR_API_URL";
pub const CACHE_TTL_VAR: &str = "COMPARCAR_CACHE_TTL_SECS";
pub const HTTP_TIMEOUT_VAR: &str = "COMPARCAR_HTTP_TIMEOUT_SECS";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives and how long responses are memoized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL including the `/api` path, without a trailing slash.
    pub api_base_url: String,
    pub cache_ttl: Duration,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Client::DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads `COMPARCAR_API_URL`, `COMPARCAR_CACHE_TTL_SECS` and
    /// `COMPARCAR_HTTP_TIMEOUT_SECS`. Missing or unparsable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_URL_VAR)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Client::DEFAULT_BASE_URL.to_string());
        Self {
            api_base_url,
            cache_ttl: Duration::from_secs(secs(&lookup, CACHE_TTL_VAR, DEFAULT_CACHE_TTL_SECS)),
            http_timeout: Duration::from_secs(secs(
                &lookup,
                HTTP_TIMEOUT_VAR,
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
        }
    }

    /// Overrides the API base URL (e.g. from a command-line flag).
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Builds a memoizing client for this configuration.
    pub fn build_client(&self) -> CachedClient {
        let inner = Client::with_base_url(&self.api_base_url).with_timeout(self.http_timeout);
        CachedClient::from_client(inner, MemoryCache::new(self.cache_ttl))
    }
}

fn secs<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
