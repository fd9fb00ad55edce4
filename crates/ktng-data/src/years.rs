//! Selectable business years and the export request built from them.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Most recent business year the backend supports.
pub const LATEST_BUSINESS_YEAR: u16 = 2024;

/// Number of consecutive selectable years, ending at [`LATEST_BUSINESS_YEAR`].
pub const SELECTABLE_YEARS: u16 = 15;

/// Oldest selectable business year.
pub const EARLIEST_BUSINESS_YEAR: u16 = LATEST_BUSINESS_YEAR - SELECTABLE_YEARS + 1;

/// Year preselected in both inputs of the form.
pub const DEFAULT_BUSINESS_YEAR: BusinessYear = BusinessYear(2022);

/// A business year from the selectable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct BusinessYear(u16);

impl BusinessYear {
    /// Create a business year, rejecting values outside the selectable range.
    pub fn new(year: u16) -> Result<Self> {
        if (EARLIEST_BUSINESS_YEAR..=LATEST_BUSINESS_YEAR).contains(&year) {
            Ok(Self(year))
        } else {
            Err(invalid_year(year.to_string()))
        }
    }

    /// All selectable years, most recent first.
    pub fn selectable() -> Vec<Self> {
        (EARLIEST_BUSINESS_YEAR..=LATEST_BUSINESS_YEAR)
            .rev()
            .map(Self)
            .collect()
    }

    /// The year as a number.
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl Default for BusinessYear {
    fn default() -> Self {
        DEFAULT_BUSINESS_YEAR
    }
}

impl FromStr for BusinessYear {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let year: u16 = trimmed.parse().map_err(|_| invalid_year(trimmed.to_string()))?;
        Self::new(year)
    }
}

impl TryFrom<u16> for BusinessYear {
    type Error = DataError;

    fn try_from(year: u16) -> Result<Self> {
        Self::new(year)
    }
}

impl From<BusinessYear> for u16 {
    fn from(year: BusinessYear) -> Self {
        year.0
    }
}

impl fmt::Display for BusinessYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn invalid_year(value: String) -> DataError {
    DataError::InvalidYear {
        value,
        first: EARLIEST_BUSINESS_YEAR,
        last: LATEST_BUSINESS_YEAR,
    }
}

/// Year range for one export.
///
/// The range is forwarded verbatim: nothing requires `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    /// First business year requested.
    pub start: BusinessYear,

    /// Last business year requested.
    pub end: BusinessYear,
}

impl ExportRequest {
    /// Create a new export request.
    pub const fn new(start: BusinessYear, end: BusinessYear) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_selectable_range() {
        let years = BusinessYear::selectable();
        assert_eq!(years.len(), SELECTABLE_YEARS as usize);
        assert_eq!(years.first().map(BusinessYear::value), Some(2024));
        assert_eq!(years.last().map(BusinessYear::value), Some(2010));
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }

    #[rstest]
    #[case("2010", 2010)]
    #[case(" 2024 ", 2024)]
    #[case("2022", 2022)]
    fn test_parse_valid(#[case] input: &str, #[case] expected: u16) {
        assert_eq!(input.parse::<BusinessYear>().unwrap().value(), expected);
    }

    #[rstest]
    #[case("2009")]
    #[case("2025")]
    #[case("twenty")]
    #[case("")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(matches!(
            input.parse::<BusinessYear>(),
            Err(DataError::InvalidYear { .. })
        ));
    }

    #[test]
    fn test_default_request() {
        let request = ExportRequest::default();
        assert_eq!(request.start.value(), 2022);
        assert_eq!(request.end.value(), 2022);
    }

    #[test]
    fn test_reversed_range_is_kept() {
        let request = ExportRequest::new(
            BusinessYear::new(2023).unwrap(),
            BusinessYear::new(2015).unwrap(),
        );
        assert_eq!(request.to_string(), "2023~2015");
    }
}
