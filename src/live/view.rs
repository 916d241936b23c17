//! Live results view rendering

use super::poller::PollerState;
use crate::common::types::LiveStatus;
use crate::display::format::{format_number, NOT_AVAILABLE};
use crate::display::panels::DisplayLine;

/// Heading of the live results view
pub const LIVE_RESULTS_TITLE: &str = "Dual-Class Arbitrage Strategy";

/// Shown until the first successful fetch
pub const LOADING_MESSAGE: &str = "Loading live results...";

/// Runtime statistics shown, as (statistic key, label)
pub const DISPLAYED_STATISTICS: [(&str, &str); 4] = [
    ("Equity", "Equity"),
    ("Return", "Return"),
    ("Net Profit", "Net Profit"),
    ("Unrealized", "Unrealized P/L"),
];

/// Rendered live results view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveView {
    Loading,
    Ready {
        title: String,
        lines: Vec<DisplayLine>,
    },
}

impl std::fmt::Display for LiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveView::Loading => write!(f, "{}", LOADING_MESSAGE),
            LiveView::Ready { title, lines } => {
                writeln!(f, "{}", title)?;
                for line in lines {
                    writeln!(f, "  {}", line)?;
                }
                Ok(())
            }
        }
    }
}

fn stat_value(status: &LiveStatus, key: &str) -> String {
    match status.runtime_statistics.get(key) {
        Some(serde_json::Value::Number(n)) => format_number(n.as_f64()),
        _ => status
            .stat_text(key)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

pub fn render_live_status(status: &LiveStatus) -> Vec<DisplayLine> {
    let mut lines = vec![DisplayLine::new(
        "Status",
        status.status.as_deref().unwrap_or(NOT_AVAILABLE),
    )];
    lines.extend(
        DISPLAYED_STATISTICS
            .iter()
            .map(|(key, label)| DisplayLine::new(*label, stat_value(status, key))),
    );
    lines
}

pub fn render_live_view(state: &PollerState) -> LiveView {
    match state {
        PollerState::Loading => LiveView::Loading,
        PollerState::Ready(status) => LiveView::Ready {
            title: LIVE_RESULTS_TITLE.to_string(),
            lines: render_live_status(status),
        },
    }
}
