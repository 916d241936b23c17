//! Trait definitions for the remote collaborators
//!
//! The coordinator and the poller only talk to the backend through these
//! seams, so tests can substitute scripted or mocked implementations.

use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use super::errors::Result;
use super::types::{LiveStatus, StrategyResult};
use crate::api::messages::StrategyRequest;

/// Source of computed trading strategies
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StrategyApi: Send + Sync {
    /// Request a strategy for one company and investment amount
    ///
    /// # Arguments
    /// * `request` - Company name and investment amount to price
    async fn fetch_strategy(&self, request: &StrategyRequest) -> Result<StrategyResult>;
}

/// Source of live status snapshots for the running strategy
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LiveResultsApi: Send + Sync {
    /// Fetch the current status and runtime statistics
    async fn fetch_live_results(&self) -> Result<LiveStatus>;
}

/// Shared strategy source for dynamic dispatch
pub type SharedStrategyApi = Arc<dyn StrategyApi>;

/// Shared live results source for dynamic dispatch
pub type SharedLiveResultsApi = Arc<dyn LiveResultsApi>;
