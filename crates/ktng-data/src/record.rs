//! Financial statement line items as reported by the disclosure backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default for a missing amount field.
pub const DEFAULT_AMOUNT: &str = "0";

/// Default for a missing account classifier.
pub const DEFAULT_ACCOUNT_ID: &str = "";

/// The two statement kinds the backend returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Consolidated statement of financial position (CFS)
    ConsolidatedBalanceSheet,

    /// Consolidated income statement (CIS)
    ConsolidatedIncomeStatement,
}

impl StatementKind {
    /// Returns both statement kinds in export order.
    pub const fn all() -> [Self; 2] {
        [
            Self::ConsolidatedBalanceSheet,
            Self::ConsolidatedIncomeStatement,
        ]
    }

    /// Statement label as it appears in disclosure filings.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ConsolidatedBalanceSheet => "연결재무상태표",
            Self::ConsolidatedIncomeStatement => "연결손익계산서",
        }
    }

    /// Short code used in export file names.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConsolidatedBalanceSheet => "CFS",
            Self::ConsolidatedIncomeStatement => "CIS",
        }
    }

    /// Parse a statement label, ignoring surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all().into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

/// One reported line item.
///
/// Records are read-only once received. The optional members keep whatever the
/// backend sent; the accessors apply the export defaults (`""` for the account
/// id, `"0"` for both amounts) when a value is absent, `null` or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    #[serde(rename = "rcept_no")]
    receipt_id: String,

    #[serde(rename = "bsns_year")]
    fiscal_year: String,

    #[serde(rename = "sj_nm")]
    statement_name: String,

    #[serde(rename = "account_nm")]
    account_name: String,

    #[serde(rename = "account_id", default, skip_serializing_if = "Option::is_none")]
    account_id: Option<String>,

    #[serde(rename = "thstrm_amount", default, skip_serializing_if = "Option::is_none")]
    current_amount: Option<String>,

    #[serde(rename = "frmtrm_amount", default, skip_serializing_if = "Option::is_none")]
    prior_amount: Option<String>,
}

impl FinancialRecord {
    /// Create a record with the required members and no optional ones.
    pub fn new(
        receipt_id: impl Into<String>,
        fiscal_year: impl Into<String>,
        statement_name: impl Into<String>,
        account_name: impl Into<String>,
    ) -> Self {
        Self {
            receipt_id: receipt_id.into(),
            fiscal_year: fiscal_year.into(),
            statement_name: statement_name.into(),
            account_name: account_name.into(),
            account_id: None,
            current_amount: None,
            prior_amount: None,
        }
    }

    /// Set the upstream account classifier.
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Set the current-period and prior-period amounts.
    pub fn with_amounts(mut self, current: impl Into<String>, prior: impl Into<String>) -> Self {
        self.current_amount = Some(current.into());
        self.prior_amount = Some(prior.into());
        self
    }

    /// Receipt number of the filing this line item came from.
    pub fn receipt_id(&self) -> &str {
        &self.receipt_id
    }

    /// Business year as sent by the backend.
    pub fn fiscal_year(&self) -> &str {
        &self.fiscal_year
    }

    /// Business year as an integer, if it parses.
    pub fn fiscal_year_value(&self) -> Option<i32> {
        self.fiscal_year.trim().parse().ok()
    }

    /// Statement label.
    pub fn statement_name(&self) -> &str {
        &self.statement_name
    }

    /// Statement kind, if the label is one of the two known statements.
    pub fn statement_kind(&self) -> Option<StatementKind> {
        StatementKind::from_label(&self.statement_name)
    }

    /// Localized line-item name.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Account classifier, or `""` when absent.
    pub fn account_id(&self) -> &str {
        non_empty(self.account_id.as_deref()).unwrap_or(DEFAULT_ACCOUNT_ID)
    }

    /// Current-period amount, or `"0"` when absent.
    pub fn current_amount(&self) -> &str {
        non_empty(self.current_amount.as_deref()).unwrap_or(DEFAULT_AMOUNT)
    }

    /// Prior-period amount, or `"0"` when absent.
    pub fn prior_amount(&self) -> &str {
        non_empty(self.prior_amount.as_deref()).unwrap_or(DEFAULT_AMOUNT)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
