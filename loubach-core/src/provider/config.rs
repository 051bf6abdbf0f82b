//! Provider connection settings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";
pub const DEFAULT_CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Endpoints, timeout and client identity for the HTTP provider.
///
/// Missing keys in a TOML document fall back to the defaults:
///
/// ```toml
/// timeout_secs = 5
/// search_results = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Company-search endpoint.
    pub search_url: String,
    /// History endpoint; the ticker is appended as a path segment.
    pub chart_url: String,
    /// Timeout applied to every outbound request.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// `quotesCount` sent with each search.
    pub search_results: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            chart_url: DEFAULT_CHART_URL.to_string(),
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_results: 10,
        }
    }
}

impl ProviderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: ProviderConfig =
            toml::from_str(s).map_err(|e| Error::Config(format!("parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".into()));
        }
        if self.search_results == 0 {
            return Err(Error::Config("search_results must be greater than zero".into()));
        }
        for (key, url) in [("search_url", &self.search_url), ("chart_url", &self.chart_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!("{key} must be an http(s) URL, got '{url}'")));
            }
        }
        Ok(())
    }
}
