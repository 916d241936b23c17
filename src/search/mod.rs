//! Search module - company directory, suggestions and the search input controller

pub mod controller;
pub mod directory;
pub mod pointer;
pub mod suggest;

pub use controller::{SearchController, SearchSession, SearchState, SelectionEvent};
pub use directory::{CompanyDirectory, TickerPair};
pub use pointer::{Activation, ActivationKind, Bounds, ListenerHandle, PointerBus};
pub use suggest::{suggest, MAX_SUGGESTIONS};
