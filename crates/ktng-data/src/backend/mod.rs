//! Access to the financials backend.
//!
//! The backend sits in front of the regulatory disclosure API and merges the
//! consolidated balance sheet and income statement for every requested year
//! into one `data` array.
//!
//! # Example
//!
//! ```no_run
//! use ktng_data::backend::{FinancialsClient, KTNG_CORP_CODE};
//! use ktng_data::{BusinessYear, ExportRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FinancialsClient::new(Some("http://127.0.0.1:8000"), KTNG_CORP_CODE)?;
//!     let request = ExportRequest::new(BusinessYear::new(2020)?, BusinessYear::new(2022)?);
//!     let records = client.fetch_financials(&request).await?;
//!     println!("Fetched {} line items", records.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod response;

pub use client::{FINANCIALS_PATH, FinancialsClient, KTNG_CORP_CODE};
pub use response::{check_status, validate_envelope};
