#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ktng-financials/ktng-export/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod error;
pub mod record;
pub mod years;

pub use backend::FinancialsClient;
pub use error::{DataError, Result};
pub use record::{FinancialRecord, StatementKind};
pub use years::{BusinessYear, ExportRequest};

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
