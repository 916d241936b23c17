//! Slot reducer for strategy fetch completions
//!
//! Every request is stamped with a monotonically increasing id. Each display
//! slot remembers the latest id issued to it and only accepts the completion
//! carrying that id, so a slow response from a superseded request can never
//! overwrite newer data.

use tracing::{debug, error, info};

use crate::common::errors::ClientError;
use crate::common::types::StrategyResult;

/// Display surfaces fed by strategy fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplaySlot {
    /// Key info panel under the search box
    Summary,
    /// Strategy detail inside the modal
    Modal,
}

impl std::fmt::Display for DisplaySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplaySlot::Summary => write!(f, "summary"),
            DisplaySlot::Modal => write!(f, "modal"),
        }
    }
}

/// What caused a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    /// A company was picked from the search box
    SelectionChanged,
    /// The investment amount was edited with a company already selected
    AmountChanged,
}

impl FetchTrigger {
    /// Slots a completion for this trigger may update
    pub fn slots(self) -> &'static [DisplaySlot] {
        match self {
            FetchTrigger::SelectionChanged => &[DisplaySlot::Summary, DisplaySlot::Modal],
            FetchTrigger::AmountChanged => &[DisplaySlot::Modal],
        }
    }
}

/// Outcome of one strategy request, reported back to the coordinator
#[derive(Debug)]
pub struct FetchCompletion {
    pub request_id: u64,
    pub trigger: FetchTrigger,
    pub company: String,
    pub result: Result<StrategyResult, ClientError>,
}

/// Latest accepted snapshot per slot plus the sequencing state
#[derive(Debug, Default)]
pub struct DisplaySlots {
    summary: Option<StrategyResult>,
    modal: Option<StrategyResult>,
    last_issued: u64,
    summary_latest: u64,
    modal_latest: u64,
}

impl DisplaySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Option<&StrategyResult> {
        self.summary.as_ref()
    }

    pub fn modal(&self) -> Option<&StrategyResult> {
        self.modal.as_ref()
    }

    /// Id of the most recent request routed to `slot` (0 if none)
    pub fn latest_for(&self, slot: DisplaySlot) -> u64 {
        match slot {
            DisplaySlot::Summary => self.summary_latest,
            DisplaySlot::Modal => self.modal_latest,
        }
    }

    /// Allocate a request id and claim the trigger's slots for it
    pub fn issue(&mut self, trigger: FetchTrigger) -> u64 {
        self.last_issued += 1;
        let id = self.last_issued;
        for slot in trigger.slots() {
            match slot {
                DisplaySlot::Summary => self.summary_latest = id,
                DisplaySlot::Modal => self.modal_latest = id,
            }
        }
        id
    }

    /// Apply a completion, returning the slots that changed
    ///
    /// Failures and superseded responses leave every slot untouched.
    pub fn apply(&mut self, completion: FetchCompletion) -> Vec<DisplaySlot> {
        let FetchCompletion {
            request_id,
            trigger,
            company,
            result,
        } = completion;

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(
                    "Error fetching trading strategy for '{}' (request {}): {}",
                    company, request_id, e
                );
                return Vec::new();
            }
        };

        let mut updated = Vec::new();
        for &slot in trigger.slots() {
            if self.latest_for(slot) != request_id {
                debug!(
                    "Discarding stale response {} for {} slot (latest {})",
                    request_id,
                    slot,
                    self.latest_for(slot)
                );
                continue;
            }
            match slot {
                DisplaySlot::Summary => self.summary = Some(snapshot.clone()),
                DisplaySlot::Modal => self.modal = Some(snapshot.clone()),
            }
            updated.push(slot);
        }

        if !updated.is_empty() {
            info!(
                "Trading strategy for '{}' applied to {:?} (request {})",
                company, updated, request_id
            );
        }
        updated
    }
}
