//! Error types for export output.

use thiserror::Error;

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Errors that can occur while ordering, encoding or saving an export.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The query succeeded but returned no records
    #[error("the query succeeded but there is no data to download")]
    EmptyDataset,

    /// No collation data for the requested locale
    #[error("collation unavailable for locale {locale}: {reason}")]
    Collation {
        /// Requested locale tag
        locale: String,
        /// Underlying failure
        reason: String,
    },

    /// CSV writer error
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
