//! CSV encoding of the ordered export.
//!
//! The output is byte-exact: a UTF-8 byte-order mark, the fixed Korean header
//! row, then one row per record joined by `\n` with no trailing terminator.
//! Text columns are wrapped in double quotes without escaping, so a quote or
//! comma inside an account name is written as-is.

use crate::error::Result;
use crate::transform::NormalizedRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io;

/// Byte-order mark that lets spreadsheet applications detect UTF-8.
pub const BOM: char = '\u{FEFF}';

/// Header row, in column order.
pub const CSV_HEADER: [&str; 6] = [
    "사업연도",
    "재무제표명",
    "계정명",
    "계정ID",
    "당기금액(원)",
    "전기금액(원)",
];

/// Encode ordered records into the export text.
///
/// Pure: the same input always yields the same bytes.
///
/// # Example
/// ```
/// use ktng_output::{NormalizedRecord, encode_csv};
///
/// let row = NormalizedRecord {
///     receipt_id: "20230308000798".to_string(),
///     fiscal_year: "2022".to_string(),
///     statement_name: "연결손익계산서".to_string(),
///     account_name: "매출액".to_string(),
///     account_id: "ifrs-full_Revenue".to_string(),
///     current_amount: "5851390000000".to_string(),
///     prior_amount: "5228382000000".to_string(),
/// };
///
/// let csv = encode_csv(&[row]).unwrap();
/// assert!(csv.ends_with(r#"2022,"연결손익계산서","매출액","ifrs-full_Revenue",5851390000000,5228382000000"#));
/// ```
pub fn encode_csv(records: &[NormalizedRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    let mut bom = [0u8; 3];
    buffer.extend_from_slice(BOM.encode_utf8(&mut bom).as_bytes());

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        let statement_name = quoted(&record.statement_name);
        let account_name = quoted(&record.account_name);
        let account_id = quoted(&record.account_id);

        wtr.write_record([
            record.fiscal_year.as_str(),
            statement_name.as_str(),
            account_name.as_str(),
            account_id.as_str(),
            record.current_amount.as_str(),
            record.prior_amount.as_str(),
        ])?;
    }

    let mut bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field)
}
