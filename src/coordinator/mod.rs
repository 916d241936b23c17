//! Coordinator module - selection state and strategy fetch routing
//!
//! ```text
//!   SelectionEvent ──► on_company_selected ──► SelectionChanged ─┐
//!   amount edit    ──► on_amount_changed   ──► AmountChanged   ──┤
//!                                                                ▼
//!                                   spawned fetch (request id N)
//!                                                                │
//!                                   FetchCompletion ◄────────────┘
//!                                                                │
//!                                   DisplaySlots::apply
//!                                     SelectionChanged → summary + modal
//!                                     AmountChanged    → modal
//!                                     id != latest     → discarded
//! ```

#[allow(clippy::module_inception)]
pub mod coordinator;
pub mod reducer;
pub mod selection;

pub use coordinator::FetchCoordinator;
pub use reducer::{DisplaySlot, DisplaySlots, FetchCompletion, FetchTrigger};
pub use selection::{InvestmentAmount, SelectionState, DEFAULT_INVESTMENT_AMOUNT};
