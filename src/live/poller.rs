//! Periodic live results poller
//!
//! Mounting spawns a task that fetches immediately and then once per
//! period. The returned [`PollerHandle`] owns the task: unmounting or
//! dropping it cancels the schedule, and no fetch starts afterwards.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::common::traits::SharedLiveResultsApi;
use crate::common::types::LiveStatus;
use crate::config::types::LiveConfig;

/// Default delay between live result fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// What the live results view currently has to show
#[derive(Debug, Clone, PartialEq)]
pub enum PollerState {
    /// Mounted, no successful fetch yet
    Loading,
    /// Mounted, holding the most recent successful snapshot
    Ready(LiveStatus),
}

impl PollerState {
    pub fn status(&self) -> Option<&LiveStatus> {
        match self {
            PollerState::Loading => None,
            PollerState::Ready(status) => Some(status),
        }
    }
}

/// Factory for mounted polling tasks
#[derive(Clone)]
pub struct LivePoller {
    api: SharedLiveResultsApi,
    period: Duration,
}

impl LivePoller {
    pub fn new(api: SharedLiveResultsApi) -> Self {
        Self::with_period(api, DEFAULT_POLL_INTERVAL)
    }

    /// Poll with a custom period (zero is bumped to one millisecond)
    pub fn with_period(api: SharedLiveResultsApi, period: Duration) -> Self {
        Self {
            api,
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(api: SharedLiveResultsApi, config: &LiveConfig) -> Self {
        Self::with_period(api, Duration::from_secs(config.poll_interval_seconds))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start polling on the current tokio runtime
    pub fn mount(&self) -> PollerHandle {
        let (state_tx, state_rx) = watch::channel(PollerState::Loading);
        let cancelled = Arc::new(AtomicBool::new(false));
        let fetches = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(poll_loop(
            self.api.clone(),
            self.period,
            state_tx,
            cancelled.clone(),
            fetches.clone(),
        ));

        info!("Live results poller mounted, period {:?}", self.period);
        PollerHandle {
            state_rx,
            task: Some(task),
            cancelled,
            fetches,
        }
    }
}

async fn poll_loop(
    api: SharedLiveResultsApi,
    period: Duration,
    state_tx: watch::Sender<PollerState>,
    cancelled: Arc<AtomicBool>,
    fetches: Arc<AtomicU64>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if cancelled.load(Ordering::SeqCst) {
            break;
        }

        let count = fetches.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Fetching live results (fetch {})", count);

        match api.fetch_live_results().await {
            Ok(status) => {
                if cancelled.load(Ordering::SeqCst) {
                    break;
                }
                state_tx.send_replace(PollerState::Ready(status));
            }
            Err(e) => {
                error!("Error fetching live results: {}", e);
            }
        }

        ticker.tick().await;
    }

    debug!("Live results poll loop exited");
}

/// Mounted poller; cancels its schedule when unmounted or dropped
pub struct PollerHandle {
    state_rx: watch::Receiver<PollerState>,
    task: Option<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
    fetches: Arc<AtomicU64>,
}

impl PollerHandle {
    /// Current state snapshot
    pub fn state(&self) -> PollerState {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified on every state replacement
    pub fn subscribe(&self) -> watch::Receiver<PollerState> {
        self.state_rx.clone()
    }

    /// Number of fetches started so far
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn is_mounted(&self) -> bool {
        self.task.is_some()
    }

    /// Cancel the schedule
    ///
    /// Idempotent. The task is aborted, so it is never polled again and no
    /// further fetch can start.
    pub fn unmount(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Live results poller unmounted");
        }
    }

    /// Cancel the schedule and wait for the task to finish
    pub async fn shutdown(mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("Live results poller shut down");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}
