//! Error types for the application

use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The backend answered but reported a failure
    #[error("Backend failure (status {status}): {detail}")]
    BackendFailure { status: u16, detail: String },

    /// Company is not part of the directory
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// Company is listed but has no usable ticker pair
    #[error("No tickers found for company: {0}")]
    EmptyTickerPair(String),

    /// Malformed base URL or endpoint path
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Whether the error came from the user picking something outside the directory
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            ClientError::CompanyNotFound(_) | ClientError::EmptyTickerPair(_)
        )
    }
}
