//! Configuration types

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Live results polling configuration
    #[serde(default)]
    pub live: LiveConfig,
    /// Dual-class company directory
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the strategy backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Live results polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Delay between live result fetches in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    60
}

/// One company entry in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntry {
    /// Display name, unique within the directory
    pub name: String,
    /// Ticker symbols, long candidate first
    #[serde(default)]
    pub tickers: Vec<String>,
}

impl CompanyEntry {
    pub fn new(name: &str, long: &str, short: &str) -> Self {
        Self {
            name: name.to_string(),
            tickers: vec![long.to_string(), short.to_string()],
        }
    }
}

/// Ordered list of dual-class companies offered for search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_companies")]
    pub companies: Vec<CompanyEntry>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            companies: default_companies(),
        }
    }
}

fn default_companies() -> Vec<CompanyEntry> {
    vec![
        CompanyEntry::new("Alphabet", "GOOGL", "GOOG"),
        CompanyEntry::new("American Homes 4 Rent", "AMH", "AMH-PG"),
        CompanyEntry::new("Berkshire Hathaway", "BRK-B", "BRK-A"),
        CompanyEntry::new("Crawford & Company", "CRD-A", "CRD-B"),
        CompanyEntry::new("Gray Television", "GTN", "GTN-A"),
        CompanyEntry::new("Haverty Furniture Companies", "HVT", "HVT-A"),
        CompanyEntry::new("Moog", "MOG-A", "MOG-B"),
    ]
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.request_timeout_seconds, 30);
        assert_eq!(config.live.poll_interval_seconds, 60);
        assert_eq!(config.directory.companies.len(), 7);
        assert_eq!(config.directory.companies[0].name, "Alphabet");
        assert_eq!(config.settings.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"api": {"base_url": "http://example.test"}}"#)
            .unwrap();
        assert_eq!(config.api.base_url, "http://example.test");
        assert_eq!(config.api.request_timeout_seconds, 30);
        assert_eq!(config.directory.companies.len(), 7);
    }
}
