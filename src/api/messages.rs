//! Wire types for the strategy backend

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/trading-strategy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRequest {
    pub security_name: String,
    pub investment_amount: f64,
}

impl StrategyRequest {
    pub fn new(security_name: impl Into<String>, investment_amount: f64) -> Self {
        Self {
            security_name: security_name.into(),
            investment_amount,
        }
    }
}

/// Response of `POST /api/trading-strategy`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyResponse {
    #[serde(default)]
    pub strategy: Option<StrategyPayload>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spread: Option<f64>,
}

/// Computed long/short legs
///
/// Numeric fields are decoded leniently: a number or numeric string becomes
/// a value, anything else (null, garbage, non-finite) becomes `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub ticker_long: Option<String>,
    #[serde(default)]
    pub ticker_short: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_long: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_short: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub shares_long: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub shares_short: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub hedge_ratio: Option<f64>,
}

/// Response of `GET /api/live-results`
///
/// The backend forwards the upstream payload verbatim on success and an
/// envelope with `success: false` when the upstream call fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveResultsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "runtimeStatistics", default)]
    pub runtime_statistics: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl LiveResultsResponse {
    /// Whether the backend reported an upstream failure
    pub fn is_failure(&self) -> bool {
        self.success == Some(false)
    }

    /// Joined error messages from a failure envelope
    pub fn error_summary(&self) -> String {
        match &self.errors {
            Some(errors) if !errors.is_empty() => errors
                .iter()
                .map(|e| match e {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
            _ => "Unknown error".to_string(),
        }
    }
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// FastAPI style error body (`{"detail": ...}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}
