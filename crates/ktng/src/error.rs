//! Errors surfaced by an export attempt.

use ktng_data::DataError;
use ktng_output::OutputError;
use thiserror::Error;

/// Failure of one export attempt.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Fetching or validating the backend response failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// Ordering, encoding or saving the export failed
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Classification of an [`ExportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure or non-success status
    Network,
    /// The disclosure source reported an error
    Upstream,
    /// The response violated the expected shape
    Format,
    /// Valid response with zero records
    EmptyDataset,
    /// Rejected user input
    InvalidInput,
    /// Encoding or writing the file failed
    Output,
}

impl ExportError {
    /// Which step of the pipeline failed.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Data(DataError::Network(_)) => ErrorKind::Network,
            Self::Data(DataError::Upstream(_)) => ErrorKind::Upstream,
            Self::Data(DataError::Format(_)) => ErrorKind::Format,
            Self::Data(DataError::InvalidYear { .. }) => ErrorKind::InvalidInput,
            Self::Output(OutputError::EmptyDataset) => ErrorKind::EmptyDataset,
            Self::Output(_) => ErrorKind::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DataError::Network("503 Service Unavailable".into()).into(), ErrorKind::Network)]
    #[case(DataError::Upstream("X".into()).into(), ErrorKind::Upstream)]
    #[case(DataError::Format("`data` is null".into()).into(), ErrorKind::Format)]
    #[case(OutputError::EmptyDataset.into(), ErrorKind::EmptyDataset)]
    #[case(OutputError::Io(std::io::Error::other("disk full")).into(), ErrorKind::Output)]
    #[case(
        DataError::InvalidYear { value: "2009".into(), first: 2010, last: 2024 }.into(),
        ErrorKind::InvalidInput
    )]
    #[case(
        OutputError::Collation { locale: "xx".into(), reason: "no data".into() }.into(),
        ErrorKind::Output
    )]
    fn test_kind_mapping(#[case] err: ExportError, #[case] expected: ErrorKind) {
        assert_eq!(err.kind(), expected);
    }

    #[test]
    fn test_message_is_transparent() {
        let err: ExportError = DataError::Upstream("X".into()).into();
        assert_eq!(err.to_string(), "upstream disclosure API error: X");
    }
}
