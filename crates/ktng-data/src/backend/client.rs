//! HTTP client for the financials backend.

use crate::backend::response::{check_status, validate_envelope};
use crate::error::{DataError, Result};
use crate::record::FinancialRecord;
use crate::years::ExportRequest;
use serde_json::Value;
use tracing::{debug, info};

/// Path of the financials endpoint below the base URL.
pub const FINANCIALS_PATH: &str = "/api/financials";

/// Corporate code of KT&G in the disclosure system.
pub const KTNG_CORP_CODE: &str = "00244455";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("ktng-export/", env!("CARGO_PKG_VERSION"));

/// Client for `GET {base}/api/financials/{company}?start_year=..&end_year=..`.
///
/// No timeout is configured: a request runs until the backend answers or the
/// connection fails.
pub struct FinancialsClient {
    client: reqwest::Client,
    base_url: String,
    company_id: String,
}

impl FinancialsClient {
    /// Create a client for the given backend.
    ///
    /// A missing `base_url` is not rejected here. Requests are then built
    /// against an empty base and fail with [`DataError::Network`] when sent.
    ///
    /// # Example
    /// ```
    /// use ktng_data::backend::{FinancialsClient, KTNG_CORP_CODE};
    ///
    /// # fn example() -> ktng_data::Result<()> {
    /// let client = FinancialsClient::new(Some("http://127.0.0.1:8000/"), KTNG_CORP_CODE)?;
    /// assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: Option<&str>, company_id: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(DataError::from)?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_default().trim_end_matches('/').to_string(),
            company_id: company_id.into(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Company identifier used as the path segment.
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    /// Build the request URL for an export.
    ///
    /// Years are forwarded unchanged, in whatever order they were selected.
    pub fn request_url(&self, request: &ExportRequest) -> String {
        format!(
            "{}{}/{}?start_year={}&end_year={}",
            self.base_url, FINANCIALS_PATH, self.company_id, request.start, request.end
        )
    }

    /// Fetch and validate the line items for the requested years.
    ///
    /// # Errors
    /// - [`DataError::Network`] on transport failure or a non-success status
    /// - [`DataError::Upstream`] when the backend relays a disclosure API error
    /// - [`DataError::Format`] when the body is not the expected envelope
    pub async fn fetch_financials(&self, request: &ExportRequest) -> Result<Vec<FinancialRecord>> {
        let url = self.request_url(request);
        info!(url = %url, "requesting financial statements");

        let response = self.client.get(&url).send().await?;
        check_status(response.status())?;

        let body: Value = response.json().await?;
        let records = validate_envelope(body)?;

        debug!(count = records.len(), "validated financial records");
        Ok(records)
    }
}

impl std::fmt::Debug for FinancialsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinancialsClient")
            .field("base_url", &self.base_url)
            .field("company_id", &self.company_id)
            .finish_non_exhaustive()
    }
}
