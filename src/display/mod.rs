//! Display module - formatting and rendering of strategy snapshots

pub mod format;
pub mod panels;

pub use format::{format_money, format_money_product, format_number, NOT_AVAILABLE};
pub use panels::{
    modal_view, render_modal_detail, render_summary, summary_view, DisplayLine,
    DisplayVisibility, ModalFrame, SummaryPanel,
};
