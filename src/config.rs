//! Tunables for the filter suite
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage entry holding the persisted control values
pub const DEFAULT_STORAGE_KEY: &str = "hdencodeFilters";

/// Page count standing in for "all pages"
pub const UNBOUNDED_PAGE_CAP: u32 = 99_999;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Key under which control values are persisted
    pub storage_key: String,
    /// Pause between two page fetches
    pub page_delay_ms: u64,
    /// Quiet window before a burst of change notifications triggers a re-run
    pub debounce_ms: u64,
    /// How long the "N page(s) loaded" status stays visible
    pub status_ttl_ms: u64,
    /// Delay between "Done!" and hiding the progress bar
    pub progress_hide_ms: u64,
    /// Upper bound used when the page limit is "all"
    pub unbounded_page_cap: u32,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_delay_ms: 300,
            debounce_ms: 150,
            status_ttl_ms: 5_000,
            progress_hide_ms: 1_500,
            unbounded_page_cap: UNBOUNDED_PAGE_CAP,
            user_agent: concat!("listing_filter/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SuiteConfig {
    /// Parse a config from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }

    pub fn progress_hide_delay(&self) -> Duration {
        Duration::from_millis(self.progress_hide_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = SuiteConfig::from_json("{}").unwrap();
        assert_eq!(config.storage_key, "hdencodeFilters");
        assert_eq!(config.page_delay(), Duration::from_millis(300));
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.unbounded_page_cap, 99_999);
    }

    #[test]
    fn test_partial_override() {
        let config = SuiteConfig::from_json(r#"{"page_delay_ms": 50, "storage_key": "x"}"#).unwrap();
        assert_eq!(config.page_delay_ms, 50);
        assert_eq!(config.storage_key, "x");
        assert_eq!(config.status_ttl_ms, 5_000);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(SuiteConfig::from_json("not json").is_err());
    }
}
