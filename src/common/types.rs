//! Snapshot types shared by the coordinator, the poller and the display layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable result of one (company, amount) strategy request
///
/// Every field the backend computes is optional: the display layer renders
/// missing values as "not available" instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Company the request was issued for
    pub company: String,
    /// Investment amount the request was issued with
    pub investment_amount: f64,
    /// Ticker to buy
    pub ticker_long: Option<String>,
    /// Ticker to sell short
    pub ticker_short: Option<String>,
    /// Price of the long leg
    pub price_long: Option<f64>,
    /// Price of the short leg
    pub price_short: Option<f64>,
    /// Number of shares to buy
    pub shares_long: Option<f64>,
    /// Number of shares to short
    pub shares_short: Option<f64>,
    /// Short-to-long ratio used to balance exposure
    pub hedge_ratio: Option<f64>,
    /// Price difference between the two share classes
    pub spread: Option<f64>,
    /// When the response was received
    pub fetched_at: DateTime<Utc>,
}

/// Point-in-time status of the running strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStatus {
    /// Deployment status reported by the backend (e.g. "Running")
    pub status: Option<String>,
    /// Free-form runtime statistics keyed by display name
    pub runtime_statistics: BTreeMap<String, serde_json::Value>,
    /// When the response was received
    pub fetched_at: DateTime<Utc>,
}

impl LiveStatus {
    /// Get a runtime statistic as display text
    ///
    /// Strings are returned verbatim, numbers and booleans via their JSON
    /// representation. Missing keys and nulls yield `None`.
    pub fn stat_text(&self, key: &str) -> Option<String> {
        match self.runtime_statistics.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
