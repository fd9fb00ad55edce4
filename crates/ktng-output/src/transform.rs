//! Ordering and normalization of validated records.

use crate::error::{OutputError, Result};
use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use icu_provider::DataLocale;
use ktng_data::FinancialRecord;
use std::cmp::Ordering;
use tracing::warn;

/// Locale used for account name ordering unless configured otherwise.
pub const DEFAULT_COLLATION_LOCALE: &str = "ko";

/// Locale-aware comparison of account names.
pub struct AccountCollator {
    collator: Collator,
    locale: String,
}

impl AccountCollator {
    /// Create a collator for a BCP-47 locale tag.
    ///
    /// Falls back to the root collation when the tag does not parse or no data
    /// exists for it.
    pub fn new(locale: &str) -> Result<Self> {
        match Self::try_new(locale) {
            Ok(collator) => Ok(collator),
            Err(err) => {
                warn!(locale, error = %err, "falling back to root collation");
                Self::root()
            }
        }
    }

    /// Create a collator for a BCP-47 locale tag without falling back.
    pub fn try_new(locale: &str) -> Result<Self> {
        let parsed: Locale = locale.parse().map_err(|e| OutputError::Collation {
            locale: locale.to_string(),
            reason: format!("{}", e),
        })?;
        Self::build(DataLocale::from(&parsed), locale)
    }

    /// Collator with the root (language-neutral) ordering.
    pub fn root() -> Result<Self> {
        Self::build(DataLocale::default(), "und")
    }

    fn build(data_locale: DataLocale, tag: &str) -> Result<Self> {
        let collator =
            Collator::try_new(&data_locale, CollatorOptions::new()).map_err(|e| {
                OutputError::Collation {
                    locale: tag.to_string(),
                    reason: format!("{}", e),
                }
            })?;

        Ok(Self {
            collator,
            locale: tag.to_string(),
        })
    }

    /// Locale tag this collator orders by.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compare two account names in natural reading order.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl std::fmt::Debug for AccountCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCollator")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// A line item with every optional field resolved to its export value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Receipt number of the source filing.
    pub receipt_id: String,
    /// Business year as sent by the backend.
    pub fiscal_year: String,
    /// Statement label.
    pub statement_name: String,
    /// Localized line-item name.
    pub account_name: String,
    /// Account classifier, `""` when absent.
    pub account_id: String,
    /// Current-period amount, `"0"` when absent.
    pub current_amount: String,
    /// Prior-period amount, `"0"` when absent.
    pub prior_amount: String,
}

impl From<&FinancialRecord> for NormalizedRecord {
    fn from(record: &FinancialRecord) -> Self {
        Self {
            receipt_id: record.receipt_id().to_string(),
            fiscal_year: record.fiscal_year().to_string(),
            statement_name: record.statement_name().to_string(),
            account_name: record.account_name().to_string(),
            account_id: record.account_id().to_string(),
            current_amount: record.current_amount().to_string(),
            prior_amount: record.prior_amount().to_string(),
        }
    }
}

/// Order and normalize records for export.
///
/// Records are sorted by business year, newest first, comparing the years as
/// integers. Within a year, account names ascend in collation order. Years that
/// do not parse sort after all others. The sort is stable, so records that
/// compare equal keep their response order.
///
/// # Errors
/// Returns [`OutputError::EmptyDataset`] when `records` is empty.
pub fn normalize_dataset(
    records: &[FinancialRecord],
    collator: &AccountCollator,
) -> Result<Vec<NormalizedRecord>> {
    if records.is_empty() {
        return Err(OutputError::EmptyDataset);
    }

    let mut keyed: Vec<_> = records
        .iter()
        .map(|record| (record.fiscal_year_value(), NormalizedRecord::from(record)))
        .collect();

    keyed.sort_by(|(year_a, a), (year_b, b)| {
        compare_years_desc(*year_a, *year_b)
            .then_with(|| collator.compare(&a.account_name, &b.account_name))
    });

    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

fn compare_years_desc(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
