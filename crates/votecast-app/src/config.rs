//! Application configuration.
//!
//! Created once at startup and handed to the backend client and the
//! search views. Values come from defaults or from the environment;
//! nothing here is persisted.

use std::env;

/// Default base URL of the hosted voting service.
pub const DEFAULT_API_BASE_URL: &str = "https://farcaster.vote/app";

/// Default keystroke debounce for channel search, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the voting service API.
    pub api_base_url: String,
    /// Keystroke debounce for channel search, in milliseconds.
    pub search_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl AppConfig {
    /// Build a configuration from the environment, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// Honors `VOTECAST_API_URL` and `VOTECAST_SEARCH_DEBOUNCE_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("VOTECAST_API_URL").unwrap_or(defaults.api_base_url),
            search_debounce_ms: env::var("VOTECAST_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.search_debounce_ms),
        }
    }
}
