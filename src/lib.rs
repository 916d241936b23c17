//! Dual-Class Client Library
//!
//! Client-side controller for dual-class share arbitrage: company search
//! with autocomplete, strategy fetches routed to a summary panel and a
//! modal, and a background poller for the running strategy's live results.

pub mod api;
pub mod common;
pub mod config;
pub mod coordinator;
pub mod display;
pub mod live;
pub mod search;

// Re-export commonly used types
pub use api::messages::StrategyRequest;
pub use api::DualClassRestClient;
pub use common::errors::{ClientError, Result};
pub use common::traits::{LiveResultsApi, StrategyApi};
pub use common::types::{LiveStatus, StrategyResult};
pub use config::types::AppConfig;
pub use coordinator::{DisplaySlot, FetchCoordinator, FetchTrigger, InvestmentAmount};
pub use display::{DisplayLine, DisplayVisibility, ModalFrame, SummaryPanel};
pub use live::{LivePoller, PollerHandle, PollerState};
pub use search::{
    suggest, Activation, Bounds, CompanyDirectory, PointerBus, SearchController, SearchState,
    SelectionEvent, TickerPair,
};
