//! Live module - background polling of the running strategy's results

pub mod poller;
pub mod view;

pub use poller::{LivePoller, PollerHandle, PollerState, DEFAULT_POLL_INTERVAL};
pub use view::{render_live_status, render_live_view, LiveView, LIVE_RESULTS_TITLE, LOADING_MESSAGE};
