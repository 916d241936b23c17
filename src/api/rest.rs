//! REST API client for the dual-class strategy backend

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::messages::*;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::{LiveResultsApi, StrategyApi};
use crate::common::types::{LiveStatus, StrategyResult};
use crate::config::types::ApiConfig;

const TRADING_STRATEGY_PATH: &str = "api/trading-strategy";
const LIVE_RESULTS_PATH: &str = "api/live-results";

/// REST API client for the strategy backend
#[derive(Debug, Clone)]
pub struct DualClassRestClient {
    /// HTTP client
    client: Client,
    /// Base URL, always ending in `/` so endpoint paths join beneath it
    base_url: Url,
}

impl DualClassRestClient {
    /// Create a new REST client
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)?;

        Ok(Self { client, base_url })
    }

    /// Create a REST client from the API section of the configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Check if the backend is up
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> Result<bool> {
        let url = self.base_url.clone();
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let health: HealthResponse = Self::decode(response).await?;
        debug!("Health probe answered: {:?}", health.message);
        Ok(true)
    }

    /// Request a trading strategy for a company and investment amount
    #[instrument(skip(self))]
    pub async fn post_trading_strategy(
        &self,
        request: &StrategyRequest,
    ) -> Result<StrategyResponse> {
        let url = self.endpoint(TRADING_STRATEGY_PATH)?;
        debug!("Requesting trading strategy from: {}", url);

        let response = self.client.post(url).json(request).send().await?;
        Self::decode(response).await
    }

    /// Get live results of the running strategy
    #[instrument(skip(self))]
    pub async fn get_live_results(&self) -> Result<LiveResultsResponse> {
        let url = self.endpoint(LIVE_RESULTS_PATH)?;
        debug!("Fetching live results from: {}", url);

        let response = self.client.get(url).send().await?;
        let live: LiveResultsResponse = Self::decode(response).await?;

        if live.is_failure() {
            return Err(ClientError::BackendFailure {
                status: live.status_code.unwrap_or(200),
                detail: live.error_summary(),
            });
        }

        Ok(live)
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Check the status and decode the body, mapping FastAPI error bodies
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorDetail>(&body)
                .map(|e| match e.detail {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or(body);
            return Err(ClientError::BackendFailure {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Convert a strategy response into a display snapshot
pub fn strategy_result_from_response(
    request: &StrategyRequest,
    response: StrategyResponse,
) -> Result<StrategyResult> {
    let strategy = response.strategy.ok_or_else(|| {
        ClientError::InvalidResponse("Response is missing the strategy object".to_string())
    })?;

    Ok(StrategyResult {
        company: request.security_name.clone(),
        investment_amount: request.investment_amount,
        ticker_long: strategy.ticker_long,
        ticker_short: strategy.ticker_short,
        price_long: strategy.price_long,
        price_short: strategy.price_short,
        shares_long: strategy.shares_long,
        shares_short: strategy.shares_short,
        hedge_ratio: strategy.hedge_ratio,
        spread: response.spread,
        fetched_at: Utc::now(),
    })
}

/// Convert a live results response into a status snapshot
pub fn live_status_from_response(response: LiveResultsResponse) -> LiveStatus {
    LiveStatus {
        status: response.status,
        runtime_statistics: response.runtime_statistics.unwrap_or_default(),
        fetched_at: Utc::now(),
    }
}

#[async_trait]
impl StrategyApi for DualClassRestClient {
    async fn fetch_strategy(&self, request: &StrategyRequest) -> Result<StrategyResult> {
        let response = self.post_trading_strategy(request).await?;
        strategy_result_from_response(request, response)
    }
}

#[async_trait]
impl LiveResultsApi for DualClassRestClient {
    async fn fetch_live_results(&self) -> Result<LiveStatus> {
        let response = self.get_live_results().await?;
        Ok(live_status_from_response(response))
    }
}
