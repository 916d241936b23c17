//! Summary panel and modal detail rendering
//!
//! Rendering is a pure function of the current snapshot. Derived totals are
//! recomputed on every call and never stored.

use serde::Serialize;

use super::format::{format_money, format_money_product, format_number, NOT_AVAILABLE};
use crate::common::types::StrategyResult;
use crate::coordinator::selection::InvestmentAmount;

/// One `label: value` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLine {
    pub label: String,
    pub value: String,
}

impl DisplayLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Whether each surface may render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayVisibility {
    /// True once any result reached the summary slot
    pub summary_eligible: bool,
    /// User toggled, closed by default
    pub modal_open: bool,
}

/// Rendered "Key Info" panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPanel {
    pub company: String,
    pub lines: Vec<DisplayLine>,
}

/// Rendered modal: the amount field plus the detail zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalFrame {
    pub amount_text: String,
    /// `None` until a strategy has been received
    pub detail: Option<Vec<DisplayLine>>,
}

fn ticker_or_na(ticker: &Option<String>) -> &str {
    ticker.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Total value of the long leg, computed from the snapshot
pub fn total_long_value(result: &StrategyResult) -> String {
    format_money_product(result.price_long, result.shares_long)
}

/// Total value of the short leg, computed from the snapshot
pub fn total_short_value(result: &StrategyResult) -> String {
    format_money_product(result.price_short, result.shares_short)
}

pub fn render_summary(result: &StrategyResult) -> SummaryPanel {
    let lines = vec![
        DisplayLine::new(
            format!("{} Price", ticker_or_na(&result.ticker_long)),
            format_money(result.price_long),
        ),
        DisplayLine::new(
            format!("{} Price", ticker_or_na(&result.ticker_short)),
            format_money(result.price_short),
        ),
        DisplayLine::new("Spread", format_money(result.spread)),
    ];
    SummaryPanel {
        company: result.company.clone(),
        lines,
    }
}

pub fn render_modal_detail(result: &StrategyResult) -> Vec<DisplayLine> {
    vec![
        DisplayLine::new("Long", ticker_or_na(&result.ticker_long)),
        DisplayLine::new("Short", ticker_or_na(&result.ticker_short)),
        DisplayLine::new("Shares to Long", format_number(result.shares_long)),
        DisplayLine::new("Shares to Short", format_number(result.shares_short)),
        DisplayLine::new("Total Long Value", total_long_value(result)),
        DisplayLine::new("Total Short Value", total_short_value(result)),
        DisplayLine::new("Hedge Ratio", format_number(result.hedge_ratio)),
    ]
}

/// Render the summary panel if it is eligible
pub fn summary_view(
    summary: Option<&StrategyResult>,
    visibility: DisplayVisibility,
) -> Option<SummaryPanel> {
    if !visibility.summary_eligible {
        return None;
    }
    summary.map(render_summary)
}

/// Render the modal if it is open
///
/// An open modal without a snapshot renders an empty detail zone.
pub fn modal_view(
    modal: Option<&StrategyResult>,
    amount: InvestmentAmount,
    visibility: DisplayVisibility,
) -> Option<ModalFrame> {
    if !visibility.modal_open {
        return None;
    }
    Some(ModalFrame {
        amount_text: amount.to_string(),
        detail: modal.map(render_modal_detail),
    })
}
