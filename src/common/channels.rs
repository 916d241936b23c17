//! Channel type definitions for inter-task communication

use tokio::sync::mpsc;

use crate::coordinator::reducer::FetchCompletion;

/// Default channel buffer size
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Create a new fetch completion channel with the default buffer size
pub fn create_completion_channel() -> (mpsc::Sender<FetchCompletion>, mpsc::Receiver<FetchCompletion>)
{
    mpsc::channel(DEFAULT_CHANNEL_SIZE)
}
