//! API module - Client implementation for the strategy backend

pub mod messages;
pub mod rest;

pub use rest::DualClassRestClient;
