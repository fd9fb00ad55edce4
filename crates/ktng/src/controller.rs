//! Export state machine.
//!
//! ```text
//!          submit                success
//!   Idle ─────────▶ Loading ─────────────▶ Idle
//!    ▲                 │
//!    │ submit          │ failure
//!    └──── Error ◀─────┘
//! ```
//!
//! A submission while `Loading` is rejected. Nothing is queued and nothing
//! cancels a running export.

use crate::config::ExportConfig;
use crate::error::{ErrorKind, ExportError};
use ktng_data::{ExportRequest, FinancialRecord, FinancialsClient, StatementKind};
use ktng_output::{AccountCollator, FileDelivery, NormalizedRecord, encode_csv, normalize_dataset};
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Source of financial records for an export.
pub trait FinancialsSource {
    /// Fetch and validate the records for `request`.
    fn fetch_financials(
        &self,
        request: &ExportRequest,
    ) -> impl Future<Output = ktng_data::Result<Vec<FinancialRecord>>> + Send;
}

impl FinancialsSource for FinancialsClient {
    fn fetch_financials(
        &self,
        request: &ExportRequest,
    ) -> impl Future<Output = ktng_data::Result<Vec<FinancialRecord>>> + Send {
        Self::fetch_financials(self, request)
    }
}

/// User-visible state of the export form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportState {
    /// Ready for a submission
    #[default]
    Idle,
    /// An export is in flight
    Loading,
    /// The last export failed with this message
    Error(String),
}

impl ExportState {
    /// Whether an export is in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Message of a failed export.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The export was saved
    Delivered(ExportSummary),
    /// The export failed; the state now holds the message
    Failed {
        /// Failing step
        kind: ErrorKind,
        /// Message shown to the user
        message: String,
    },
    /// Another export was in flight; nothing was done
    Rejected,
}

/// Outcome of a delivered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Where the file was saved.
    pub path: PathBuf,
    /// Number of data rows.
    pub rows: usize,
    /// Rows from the consolidated balance sheet.
    pub balance_sheet_rows: usize,
    /// Rows from the consolidated income statement.
    pub income_statement_rows: usize,
    /// Rows with any other statement label.
    pub other_rows: usize,
    /// Distinct business years, in file order.
    pub years: Vec<String>,
}

impl ExportSummary {
    fn new(path: PathBuf, records: &[NormalizedRecord]) -> Self {
        let mut summary = Self {
            path,
            rows: records.len(),
            balance_sheet_rows: 0,
            income_statement_rows: 0,
            other_rows: 0,
            years: Vec::new(),
        };

        for record in records {
            match StatementKind::from_label(&record.statement_name) {
                Some(StatementKind::ConsolidatedBalanceSheet) => summary.balance_sheet_rows += 1,
                Some(StatementKind::ConsolidatedIncomeStatement) => {
                    summary.income_statement_rows += 1
                }
                None => summary.other_rows += 1,
            }
            let year = summary_year(&record.fiscal_year);
            if !summary.years.contains(&year) {
                summary.years.push(year);
            }
        }

        summary
    }
}

/// Year as listed in the summary: the parsed number when it parses, else the
/// trimmed text.
fn summary_year(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .map_or_else(|_| trimmed.to_string(), |year| year.to_string())
}

/// Runs exports and owns the [`ExportState`].
pub struct ExportController<S = FinancialsClient> {
    source: S,
    collator: AccountCollator,
    delivery: FileDelivery,
    state: Mutex<ExportState>,
}

impl ExportController<FinancialsClient> {
    /// Build a controller talking to the configured backend.
    pub fn from_config(config: &ExportConfig) -> Result<Self, ExportError> {
        let client = FinancialsClient::new(config.base_url.as_deref(), config.company_id.as_str())?;
        let collator = AccountCollator::new(&config.collation_locale)?;
        let delivery = FileDelivery::new(&config.output_dir);
        Ok(Self::new(client, collator, delivery))
    }
}

impl<S: FinancialsSource> ExportController<S> {
    /// Create a controller in the `Idle` state.
    pub const fn new(source: S, collator: AccountCollator, delivery: FileDelivery) -> Self {
        Self {
            source,
            collator,
            delivery,
            state: Mutex::new(ExportState::Idle),
        }
    }

    /// Current state.
    pub fn state(&self) -> ExportState {
        self.lock_state().clone()
    }

    /// Record source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Where exports are saved.
    pub const fn delivery(&self) -> &FileDelivery {
        &self.delivery
    }

    /// Run one export.
    ///
    /// Moves to `Loading`, runs the pipeline and ends in `Idle` on success or
    /// `Error(message)` on failure. Returns [`Submission::Rejected`] without
    /// side effects when an export is already in flight.
    pub async fn submit(&self, request: ExportRequest) -> Submission {
        if !self.begin(&request) {
            return Submission::Rejected;
        }

        match self.run(&request).await {
            Ok(summary) => {
                self.transition(ExportState::Idle);
                info!(
                    %request,
                    rows = summary.rows,
                    cfs = summary.balance_sheet_rows,
                    cis = summary.income_statement_rows,
                    other = summary.other_rows,
                    "export delivered"
                );
                Submission::Delivered(summary)
            }
            Err(err) => {
                let kind = err.kind();
                let message = err.to_string();
                warn!(%request, ?kind, error = %message, "export failed");
                self.transition(ExportState::Error(message.clone()));
                Submission::Failed { kind, message }
            }
        }
    }

    async fn run(&self, request: &ExportRequest) -> Result<ExportSummary, ExportError> {
        let records = self.source.fetch_financials(request).await?;
        let sorted = normalize_dataset(&records, &self.collator)?;
        let contents = encode_csv(&sorted)?;
        let path = self.delivery.deliver(&contents, request)?;
        Ok(ExportSummary::new(path, &sorted))
    }

    fn begin(&self, request: &ExportRequest) -> bool {
        let mut state = self.lock_state();
        if state.is_loading() {
            warn!(%request, "export already in progress, submission rejected");
            return false;
        }
        debug!(%request, from = ?*state, "state -> Loading");
        *state = ExportState::Loading;
        true
    }

    fn transition(&self, next: ExportState) {
        debug!(to = ?next, "state transition");
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, ExportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> std::fmt::Debug for ExportController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportController")
            .field("collator", &self.collator)
            .field("delivery", &self.delivery)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
