//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{ApiConfig, AppConfig, AppSettings, LiveConfig};
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `APP_`, nested with `__`,
///    e.g. `APP_API__BASE_URL`)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let api = ApiConfig {
        base_url: std::env::var("DUAL_CLASS_API_URL")
            .unwrap_or_else(|_| ApiConfig::default().base_url),
        request_timeout_seconds: parse_env("DUAL_CLASS_REQUEST_TIMEOUT")?
            .unwrap_or_else(|| ApiConfig::default().request_timeout_seconds),
    };

    let live = LiveConfig {
        poll_interval_seconds: parse_env("DUAL_CLASS_POLL_INTERVAL")?
            .unwrap_or_else(|| LiveConfig::default().poll_interval_seconds),
    };

    let settings = AppSettings {
        log_level: std::env::var("DUAL_CLASS_LOG_LEVEL")
            .unwrap_or_else(|_| AppSettings::default().log_level),
    };

    Ok(AppConfig {
        api,
        live,
        directory: Default::default(),
        settings,
    })
}

fn parse_env(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ClientError::Configuration(format!("{}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
