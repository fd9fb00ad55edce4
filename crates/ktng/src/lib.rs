#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ktng-financials/ktng-export/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;

// Re-export main types from sub-crates
pub use ktng_data as data;
pub use ktng_output as output;

pub use config::ExportConfig;
pub use controller::{ExportController, ExportState, ExportSummary, FinancialsSource, Submission};
pub use error::{ErrorKind, ExportError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
