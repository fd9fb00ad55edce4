//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching and validating financial records.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport failure, unusable URL or non-success HTTP status
    #[error("API request failed: {0}")]
    Network(String),

    /// The disclosure source reported a domain error
    #[error("upstream disclosure API error: {0}")]
    Upstream(String),

    /// Response body does not match the expected envelope
    #[error("backend returned data in an unexpected format: {0}")]
    Format(String),

    /// Year outside the selectable range
    #[error("invalid business year {value}: expected {first}..={last}")]
    InvalidYear {
        /// Rejected input
        value: String,
        /// Oldest selectable year
        first: u16,
        /// Most recent selectable year
        last: u16,
    },
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Format(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}
