//! Strategy fetch coordinator
//!
//! Owns the selection and both display slots. Fetches run as spawned tasks
//! and report back over a channel; completions are applied by the
//! coordinator itself, so all state mutation stays single-writer.
//!
//! Methods that issue fetches spawn onto the current tokio runtime and must
//! be called from within one.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::reducer::{DisplaySlot, DisplaySlots, FetchCompletion, FetchTrigger};
use super::selection::{InvestmentAmount, SelectionState};
use crate::api::messages::StrategyRequest;
use crate::common::channels::create_completion_channel;
use crate::common::errors::Result;
use crate::common::traits::SharedStrategyApi;
use crate::common::types::StrategyResult;
use crate::display::panels::{modal_view, summary_view, DisplayVisibility, ModalFrame, SummaryPanel};
use crate::search::controller::SelectionEvent;
use crate::search::directory::CompanyDirectory;

/// Coordinates strategy requests for the selected company and amount
pub struct FetchCoordinator {
    api: SharedStrategyApi,
    directory: Arc<CompanyDirectory>,
    selection: SelectionState,
    slots: DisplaySlots,
    modal_open: bool,
    completion_tx: mpsc::Sender<FetchCompletion>,
    completion_rx: mpsc::Receiver<FetchCompletion>,
    in_flight: usize,
}

impl FetchCoordinator {
    pub fn new(api: SharedStrategyApi, directory: Arc<CompanyDirectory>) -> Self {
        let (completion_tx, completion_rx) = create_completion_channel();
        Self {
            api,
            directory,
            selection: SelectionState::default(),
            slots: DisplaySlots::new(),
            modal_open: false,
            completion_tx,
            completion_rx,
            in_flight: 0,
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Handle a selection emitted by the search controller
    pub fn on_selection(&mut self, event: SelectionEvent) -> Result<u64> {
        self.on_company_selected(&event.company)
    }

    /// Select a company and fetch its strategy for the current amount
    ///
    /// Unknown companies and companies without a ticker pair are logged and
    /// rejected without touching any state or sending a request. On success
    /// returns the id of the issued request.
    #[instrument(skip(self))]
    pub fn on_company_selected(&mut self, name: &str) -> Result<u64> {
        if let Err(e) = self.directory.lookup(name) {
            warn!("Selection rejected: {}", e);
            return Err(e);
        }

        self.selection.selected_company = Some(name.to_string());
        Ok(self.dispatch(FetchTrigger::SelectionChanged, name.to_string()))
    }

    /// Record a raw amount edit from the input field
    ///
    /// Returns the request id when a company is selected and a fetch was
    /// issued.
    pub fn on_amount_changed(&mut self, raw: &str) -> Option<u64> {
        self.set_investment_amount(InvestmentAmount::parse(raw))
    }

    /// Record a numeric amount edit
    pub fn set_investment_amount(&mut self, amount: impl Into<InvestmentAmount>) -> Option<u64> {
        let amount = amount.into();
        self.selection.investment_amount = amount;
        debug!("Investment amount set to {}", amount);

        let company = self.selection.selected_company.clone()?;
        Some(self.dispatch(FetchTrigger::AmountChanged, company))
    }

    /// Handle the amount field losing focus
    ///
    /// An empty field resets the amount to the default; a field that is
    /// already at the default issues nothing.
    pub fn on_amount_blur(&mut self, raw: &str) -> Option<u64> {
        if !raw.trim().is_empty() || self.selection.investment_amount.is_default() {
            return None;
        }
        self.set_investment_amount(InvestmentAmount::default())
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    // ========================================================================
    // Completions
    // ========================================================================

    /// Wait for the next completion and apply it
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Vec<DisplaySlot>> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completion_rx.recv().await?;
        Some(self.apply_completion(completion))
    }

    /// Wait until every issued request has completed
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn apply_completion(&mut self, completion: FetchCompletion) -> Vec<DisplaySlot> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.slots.apply(completion)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_company(&self) -> Option<&str> {
        self.selection.selected_company.as_deref()
    }

    pub fn investment_amount(&self) -> InvestmentAmount {
        self.selection.investment_amount
    }

    pub fn summary(&self) -> Option<&StrategyResult> {
        self.slots.summary()
    }

    pub fn modal(&self) -> Option<&StrategyResult> {
        self.slots.modal()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn visibility(&self) -> DisplayVisibility {
        DisplayVisibility {
            summary_eligible: self.slots.summary().is_some(),
            modal_open: self.modal_open,
        }
    }

    pub fn summary_panel(&self) -> Option<SummaryPanel> {
        summary_view(self.slots.summary(), self.visibility())
    }

    pub fn modal_frame(&self) -> Option<ModalFrame> {
        modal_view(
            self.slots.modal(),
            self.selection.investment_amount,
            self.visibility(),
        )
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    fn dispatch(&mut self, trigger: FetchTrigger, company: String) -> u64 {
        let request = StrategyRequest::new(company.clone(), self.selection.investment_amount.value());
        let request_id = self.slots.issue(trigger);
        self.in_flight += 1;

        info!(
            "Requesting strategy for '{}' with {} ({:?}, request {})",
            company, request.investment_amount, trigger, request_id
        );

        let api = self.api.clone();
        let sender = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_strategy(&request).await;
            let completion = FetchCompletion {
                request_id,
                trigger,
                company,
                result,
            };
            if sender.send(completion).await.is_err() {
                debug!("Coordinator dropped before request {} completed", request_id);
            }
        });

        request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::ClientError;
    use crate::common::traits::MockStrategyApi;
    use crate::config::types::{CompanyEntry, DirectoryConfig};
    use chrono::Utc;
    use tokio_test::{assert_err, assert_ok};

    fn directory() -> Arc<CompanyDirectory> {
        let mut config = DirectoryConfig::default();
        config.companies.push(CompanyEntry {
            name: "Delisted Corp".to_string(),
            tickers: vec!["DLC".to_string()],
        });
        Arc::new(CompanyDirectory::from_config(&config))
    }

    fn result_for(request: &StrategyRequest) -> StrategyResult {
        StrategyResult {
            company: request.security_name.clone(),
            investment_amount: request.investment_amount,
            ticker_long: Some("GOOGL".to_string()),
            ticker_short: Some("GOOG".to_string()),
            price_long: Some(150.005),
            price_short: Some(152.0),
            shares_long: Some((request.investment_amount / 310.0).floor()),
            shares_short: Some((request.investment_amount / 310.0).floor()),
            hedge_ratio: Some(0.98),
            spread: Some(2.0),
            fetched_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_selection_fetches_once_and_fills_both_slots() {
        let mut api = MockStrategyApi::new();
        api.expect_fetch_strategy()
            .withf(|req: &StrategyRequest| {
                req.security_name == "Alphabet" && req.investment_amount == 1000.0
            })
            .times(1)
            .returning(|req| Ok(result_for(req)));

        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());
        assert_ok!(coordinator.on_company_selected("Alphabet"));
        coordinator.settle().await;

        assert_eq!(coordinator.selected_company(), Some("Alphabet"));
        assert!(coordinator.summary().is_some());
        assert_eq!(coordinator.summary(), coordinator.modal());
        assert!(coordinator.visibility().summary_eligible);
    }

    #[tokio::test]
    async fn test_unknown_company_sends_nothing() {
        let mut api = MockStrategyApi::new();
        api.expect_fetch_strategy().times(0);

        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());
        let err = assert_err!(coordinator.on_company_selected("Nonexistent Inc"));
        assert!(matches!(err, ClientError::CompanyNotFound(_)));
        let err = assert_err!(coordinator.on_company_selected("Delisted Corp"));
        assert!(matches!(err, ClientError::EmptyTickerPair(_)));
        assert!(err.is_lookup_failure());

        assert_eq!(coordinator.selected_company(), None);
        assert_eq!(coordinator.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_amount_edit_without_selection_is_local() {
        let mut api = MockStrategyApi::new();
        api.expect_fetch_strategy().times(0);

        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());
        assert_eq!(coordinator.on_amount_changed("2500"), None);
        assert_eq!(coordinator.investment_amount().value(), 2500.0);
        assert_eq!(coordinator.on_amount_changed(""), None);
        assert_eq!(coordinator.investment_amount().value(), 1000.0);
        coordinator.settle().await;
        assert!(coordinator.modal().is_none());
    }

    #[tokio::test]
    async fn test_amount_edit_after_selection_updates_modal_only() {
        let mut api = MockStrategyApi::new();
        api.expect_fetch_strategy()
            .times(2)
            .returning(|req| Ok(result_for(req)));

        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());
        assert_ok!(coordinator.on_company_selected("Alphabet"));
        coordinator.settle().await;
        let summary_before = coordinator.summary().cloned();

        assert!(coordinator.on_amount_changed("5000").is_some());
        coordinator.settle().await;

        assert_eq!(coordinator.summary().cloned(), summary_before);
        assert_eq!(coordinator.modal().unwrap().investment_amount, 5000.0);
        assert_eq!(coordinator.summary().unwrap().investment_amount, 1000.0);
    }

    #[tokio::test]
    async fn test_selection_uses_stored_amount() {
        let mut api = MockStrategyApi::new();
        api.expect_fetch_strategy()
            .withf(|req: &StrategyRequest| req.investment_amount == 750.0)
            .times(1)
            .returning(|req| Ok(result_for(req)));

        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());
        coordinator.set_investment_amount(750.0);
        assert_ok!(coordinator.on_company_selected("Moog"));
        coordinator.settle().await;
        assert_eq!(coordinator.summary().unwrap().company, "Moog");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_state() {
        let mut api = MockStrategyApi::new();
        let mut calls = 0;
        api.expect_fetch_strategy().times(2).returning(move |req| {
            calls += 1;
            if calls == 1 {
                Ok(result_for(req))
            } else {
                Err(ClientError::InvalidResponse("upstream timeout".to_string()))
            }
        });

        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());
        assert_ok!(coordinator.on_company_selected("Alphabet"));
        coordinator.settle().await;
        let before = coordinator.modal().cloned();

        coordinator.on_amount_changed("300");
        coordinator.settle().await;

        assert_eq!(coordinator.modal().cloned(), before);
        assert_eq!(coordinator.summary().cloned(), before);
        assert_eq!(coordinator.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_blur_resets_empty_field() {
        let mut api = MockStrategyApi::new();
        api.expect_fetch_strategy()
            .times(3)
            .returning(|req| Ok(result_for(req)));

        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());
        assert_ok!(coordinator.on_company_selected("Alphabet"));
        assert_eq!(coordinator.on_amount_blur(""), None);

        coordinator.set_investment_amount(40.0);
        assert!(coordinator.on_amount_blur("").is_some());
        assert_eq!(coordinator.investment_amount().value(), 1000.0);
        assert_eq!(coordinator.on_amount_blur("40"), None);
        coordinator.settle().await;
    }

    #[tokio::test]
    async fn test_modal_before_fetch_renders_empty_detail() {
        let api = MockStrategyApi::new();
        let mut coordinator = FetchCoordinator::new(Arc::new(api), directory());

        assert!(coordinator.modal_frame().is_none());
        coordinator.open_modal();
        let frame = coordinator.modal_frame().unwrap();
        assert_eq!(frame.detail, None);
        assert!(coordinator.summary_panel().is_none());

        coordinator.close_modal();
        assert!(coordinator.modal_frame().is_none());
    }
}
