//! Search input controller
//!
//! Owns the query text and the candidate list. Keystrokes recompute the
//! candidates, a candidate click emits a [`SelectionEvent`] and resets, and
//! an activation outside the component's bounds resets without emitting.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::directory::CompanyDirectory;
use super::pointer::{Activation, Bounds, ListenerHandle, PointerBus};
use super::suggest::suggest;

/// Observable state of the search input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Empty query, no candidates
    Idle,
    /// Non-empty query, zero to four candidates
    Suggesting,
}

/// Query text and the candidates computed from it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    pub query_text: String,
    pub candidates: Vec<String>,
}

impl SearchSession {
    fn clear(&mut self) {
        self.query_text.clear();
        self.candidates.clear();
    }
}

/// Emitted upward when the user picks a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub company: String,
}

/// Autocomplete controller for the company search box
pub struct SearchController {
    directory: Arc<CompanyDirectory>,
    bounds: Bounds,
    session: SearchSession,
    listener: Option<ListenerHandle>,
}

impl SearchController {
    pub fn new(directory: Arc<CompanyDirectory>, bounds: Bounds) -> Self {
        Self {
            directory,
            bounds,
            session: SearchSession::default(),
            listener: None,
        }
    }

    /// Register the outside-activation listener
    ///
    /// Mounting an already mounted controller keeps the existing listener.
    pub fn mount(&mut self, bus: &PointerBus) {
        if self.listener.is_some() {
            debug!("Search controller already mounted");
            return;
        }
        self.listener = Some(bus.subscribe());
        info!("Search controller mounted");
    }

    /// Deregister the outside-activation listener and reset the session
    pub fn unmount(&mut self) {
        if self.listener.take().is_some() {
            info!("Search controller unmounted");
        }
        self.session.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    pub fn state(&self) -> SearchState {
        if self.session.query_text.is_empty() {
            SearchState::Idle
        } else {
            SearchState::Suggesting
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn query(&self) -> &str {
        &self.session.query_text
    }

    pub fn candidates(&self) -> &[String] {
        &self.session.candidates
    }

    /// Update the region treated as "inside" the component
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Replace the query text and recompute candidates
    pub fn on_text_input(&mut self, text: &str) -> SearchState {
        self.session.query_text = text.to_string();
        self.session.candidates = suggest(text, &self.directory);
        debug!(
            "Query '{}' produced {} candidates",
            text,
            self.session.candidates.len()
        );
        self.state()
    }

    /// Pick a candidate by name
    ///
    /// Only names currently offered as candidates can be picked.
    pub fn select_candidate(&mut self, name: &str) -> Option<SelectionEvent> {
        if !self.session.candidates.iter().any(|c| c == name) {
            warn!("'{}' is not a current candidate, ignoring click", name);
            return None;
        }
        let event = SelectionEvent {
            company: name.to_string(),
        };
        self.session.clear();
        Some(event)
    }

    /// Pick a candidate by its position in the list
    pub fn select_index(&mut self, index: usize) -> Option<SelectionEvent> {
        let name = self.session.candidates.get(index)?.clone();
        self.select_candidate(&name)
    }

    /// Handle a single activation; returns whether the session was reset
    pub fn on_activation(&mut self, activation: Activation) -> bool {
        if self.bounds.contains(activation.x, activation.y) {
            return false;
        }
        let was_active = self.state() == SearchState::Suggesting;
        self.session.clear();
        if was_active {
            debug!("Activation outside search bounds, clearing query");
        }
        was_active
    }

    /// Apply every activation delivered to the listener since the last call
    ///
    /// Returns whether any of them reset an active session. Does nothing
    /// while unmounted.
    pub fn process_activations(&mut self) -> bool {
        let activations = match self.listener.as_mut() {
            Some(listener) => listener.drain(),
            None => return false,
        };
        let mut reset = false;
        for activation in activations {
            reset |= self.on_activation(activation);
        }
        reset
    }
}
