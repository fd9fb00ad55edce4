#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/ktng-financials/ktng-export/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod delivery;
pub mod error;
pub mod export;
pub mod transform;

pub use delivery::{FileDelivery, export_filename};
pub use error::{OutputError, Result};
pub use export::{BOM, CSV_HEADER, encode_csv};
pub use transform::{AccountCollator, DEFAULT_COLLATION_LOCALE, NormalizedRecord, normalize_dataset};
