//! Common test utilities and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use dual_class_client::config::types::DirectoryConfig;
use dual_class_client::{
    ClientError, CompanyDirectory, DualClassRestClient, LiveResultsApi, LiveStatus,
    StrategyApi, StrategyRequest, StrategyResult,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use wiremock::MockServer;

/// Directory with the built-in dual-class companies
pub fn default_directory() -> Arc<CompanyDirectory> {
    Arc::new(CompanyDirectory::from_config(&DirectoryConfig::default()))
}

/// REST client pointed at a mock backend
pub fn client_for(server: &MockServer) -> DualClassRestClient {
    DualClassRestClient::with_timeout(&server.uri(), Duration::from_secs(5))
        .expect("Failed to create REST client")
}

/// Strategy request body as the backend expects it
pub fn strategy_request(company: &str, amount: f64) -> Value {
    json!({"security_name": company, "investment_amount": amount})
}

/// Snapshot the backend would compute for a request
pub fn strategy_result(request: &StrategyRequest) -> StrategyResult {
    StrategyResult {
        company: request.security_name.clone(),
        investment_amount: request.investment_amount,
        ticker_long: Some("GOOGL".to_string()),
        ticker_short: Some("GOOG".to_string()),
        price_long: Some(150.0),
        price_short: Some(152.0),
        shares_long: Some((request.investment_amount / 302.0).floor()),
        shares_short: Some((request.investment_amount / 302.0).floor()),
        hedge_ratio: Some(0.99),
        spread: Some(2.0),
        fetched_at: Utc::now(),
    }
}

type PendingReply = oneshot::Sender<Result<StrategyResult, ClientError>>;

/// Strategy backend whose responses are released by the test, in any order
#[derive(Default)]
pub struct GatedStrategyApi {
    pending: Mutex<Vec<(StrategyRequest, Option<PendingReply>)>>,
}

impl GatedStrategyApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<StrategyRequest> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// Wait until `count` requests have arrived
    pub async fn wait_for_requests(&self, count: usize) {
        for _ in 0..1000 {
            if self.pending.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("expected {} requests, got {}", count, self.requests().len());
    }

    /// Answer the request at `index` (arrival order) successfully
    pub fn release(&self, index: usize) {
        let mut pending = self.pending.lock().unwrap();
        let (request, reply) = &mut pending[index];
        let result = strategy_result(request);
        if let Some(reply) = reply.take() {
            let _ = reply.send(Ok(result));
        }
    }

    /// Answer the first request made for `amount`
    pub fn release_amount(&self, amount: f64) {
        let index = self
            .requests()
            .iter()
            .position(|r| r.investment_amount == amount)
            .unwrap_or_else(|| panic!("no request for amount {}", amount));
        self.release(index);
    }

    /// Answer the request at `index` with an error
    pub fn fail(&self, index: usize, error: ClientError) {
        let mut pending = self.pending.lock().unwrap();
        if let Some(reply) = pending[index].1.take() {
            let _ = reply.send(Err(error));
        }
    }
}

#[async_trait]
impl StrategyApi for GatedStrategyApi {
    async fn fetch_strategy(&self, request: &StrategyRequest) -> Result<StrategyResult, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap()
            .push((request.clone(), Some(tx)));
        rx.await
            .unwrap_or_else(|_| Err(ClientError::Internal("reply dropped".to_string())))
    }
}

/// Live results backend that counts calls
#[derive(Default)]
pub struct CountingLiveApi {
    calls: AtomicU64,
    failing: bool,
}

impl CountingLiveApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU64::new(0),
            failing: true,
        })
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiveResultsApi for CountingLiveApi {
    async fn fetch_live_results(&self) -> Result<LiveStatus, ClientError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing {
            return Err(ClientError::BackendFailure {
                status: 502,
                detail: "upstream unavailable".to_string(),
            });
        }
        let mut runtime_statistics = BTreeMap::new();
        runtime_statistics.insert("Equity".to_string(), json!(100_000.0 + call as f64));
        runtime_statistics.insert("Return".to_string(), json!("0.5 %"));
        Ok(LiveStatus {
            status: Some("Running".to_string()),
            runtime_statistics,
            fetched_at: Utc::now(),
        })
    }
}

/// Sample API responses for testing
pub mod api_responses {
    use serde_json::{json, Value};

    /// Strategy response for Alphabet at the default amount
    pub fn alphabet_strategy() -> Value {
        json!({
            "spread": 2.0,
            "strategy": {
                "action": "Short",
                "ticker_long": "GOOGL",
                "ticker_short": "GOOG",
                "price_long": 150.005,
                "price_short": 152.005,
                "shares_long": 3,
                "shares_short": 3,
                "total_long_value": 450.015,
                "total_short_value": 456.015,
                "hedge_ratio": 0.9868
            }
        })
    }

    /// Strategy response with the given share count, to tell requests apart
    pub fn alphabet_strategy_with_shares(shares: u32) -> Value {
        json!({
            "spread": 2.0,
            "strategy": {
                "ticker_long": "GOOGL",
                "ticker_short": "GOOG",
                "price_long": 150.0,
                "price_short": 152.0,
                "shares_long": shares,
                "shares_short": shares,
                "hedge_ratio": 0.99
            }
        })
    }

    /// Live results as forwarded from the upstream platform
    pub const LIVE_RESULTS: &str = r#"{
        "status": "Running",
        "success": true,
        "runtimeStatistics": {
            "Equity": "$101,250.40",
            "Fees": "-$12.00",
            "Holdings": "$98,000.00",
            "Net Profit": "$1,250.40",
            "Return": "1.25 %",
            "Unrealized": "$310.55",
            "Volume": "$250,000.00"
        }
    }"#;

    /// Failure envelope returned with HTTP 200
    pub const LIVE_RESULTS_FAILURE: &str = r#"{
        "errors": ["Project not found"],
        "status_code": 404,
        "success": false
    }"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory() {
        let dir = default_directory();
        assert_eq!(dir.len(), 7);
        assert!(dir.contains("Alphabet"));
    }

    #[test]
    fn test_fixtures_parse() {
        let live: Value = serde_json::from_str(api_responses::LIVE_RESULTS).unwrap();
        assert_eq!(live["status"], "Running");
        let failure: Value = serde_json::from_str(api_responses::LIVE_RESULTS_FAILURE).unwrap();
        assert_eq!(failure["success"], false);
    }
}
