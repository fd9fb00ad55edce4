//! Year selection form on the terminal.
//!
//! Two inputs constrained to the selectable years, then a submit prompt.
//! Reads and writes through generic handles so the form runs against any
//! `BufRead`/`Write` pair.

use ktng::data::{BusinessYear, DataError, ExportRequest};
use std::io::{self, BufRead, Write};

/// Parsed answer to a year prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldInput {
    /// Empty line: keep the current value
    Keep,
    /// A selectable year
    Year(BusinessYear),
    /// `q`
    Quit,
}

/// Parse one line of input for a year field.
///
/// Accepts a trailing `년` as the form labels show years that way.
pub(crate) fn parse_field(line: &str) -> Result<FieldInput, DataError> {
    let trimmed = line.trim();
    let value = trimmed.strip_suffix('년').unwrap_or(trimmed);

    match value {
        "" => Ok(FieldInput::Keep),
        "q" | "Q" => Ok(FieldInput::Quit),
        year => Ok(FieldInput::Year(year.parse()?)),
    }
}

/// What the user chose on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormAction {
    /// Download the selected range
    Submit(ExportRequest),
    /// Leave the form
    Quit,
}

/// Form values, kept between submissions.
#[derive(Debug, Default)]
pub(crate) struct YearForm {
    request: ExportRequest,
}

impl YearForm {
    /// Prompt for both years and the submit action.
    ///
    /// End of input counts as quitting.
    pub(crate) fn fill<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<FormAction> {
        writeln!(out, "Selectable years: {}", year_choices())?;

        let Some(start) = prompt_year(input, out, "Start year", self.request.start)? else {
            return Ok(FormAction::Quit);
        };
        self.request.start = start;

        let Some(end) = prompt_year(input, out, "End year", self.request.end)? else {
            return Ok(FormAction::Quit);
        };
        self.request.end = end;

        write!(out, "Download {} as CSV? [Enter / q]: ", self.request)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
            return Ok(FormAction::Quit);
        }

        Ok(FormAction::Submit(self.request))
    }
}

fn prompt_year<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    current: BusinessYear,
) -> io::Result<Option<BusinessYear>> {
    loop {
        write!(out, "{} [{}]: ", label, current)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_field(&line) {
            Ok(FieldInput::Keep) => return Ok(Some(current)),
            Ok(FieldInput::Year(year)) => return Ok(Some(year)),
            Ok(FieldInput::Quit) => return Ok(None),
            Err(e) => writeln!(out, "  {}", e)?,
        }
    }
}

/// Selectable years, most recent first.
pub(crate) fn year_choices() -> String {
    BusinessYear::selectable()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn year(value: u16) -> BusinessYear {
        BusinessYear::new(value).unwrap()
    }

    #[rstest]
    #[case("\n", FieldInput::Keep)]
    #[case("  \n", FieldInput::Keep)]
    #[case("q\n", FieldInput::Quit)]
    #[case("2019\n", FieldInput::Year(BusinessYear::new(2019).unwrap()))]
    #[case("2024년\n", FieldInput::Year(BusinessYear::new(2024).unwrap()))]
    fn test_parse_field(#[case] line: &str, #[case] expected: FieldInput) {
        assert_eq!(parse_field(line).unwrap(), expected);
    }

    #[rstest]
    #[case("2009\n")]
    #[case("2030\n")]
    #[case("abc\n")]
    fn test_parse_field_rejects(#[case] line: &str) {
        assert!(parse_field(line).is_err());
    }

    #[test]
    fn test_fill_with_defaults() {
        let mut form = YearForm::default();
        let mut input = Cursor::new("\n\n\n");
        let mut out = Vec::new();

        let action = form.fill(&mut input, &mut out).unwrap();

        assert_eq!(
            action,
            FormAction::Submit(ExportRequest::new(year(2022), year(2022)))
        );
    }

    #[test]
    fn test_fill_reprompts_invalid_year() {
        let mut form = YearForm::default();
        let mut input = Cursor::new("1999\n2015\n2020\n\n");
        let mut out = Vec::new();

        let action = form.fill(&mut input, &mut out).unwrap();
        let transcript = String::from_utf8(out).unwrap();

        assert_eq!(
            action,
            FormAction::Submit(ExportRequest::new(year(2015), year(2020)))
        );
        assert!(transcript.contains("invalid business year 1999"));
    }

    #[test]
    fn test_fill_keeps_previous_values() {
        let mut form = YearForm::default();
        let mut out = Vec::new();

        form.fill(&mut Cursor::new("2023\n2011\n\n"), &mut out).unwrap();
        let action = form.fill(&mut Cursor::new("\n\n\n"), &mut out).unwrap();

        assert_eq!(
            action,
            FormAction::Submit(ExportRequest::new(year(2023), year(2011)))
        );
    }

    #[rstest]
    #[case("q\n")]
    #[case("2020\nq\n")]
    #[case("2020\n2021\nq\n")]
    #[case("")]
    fn test_fill_quit(#[case] script: &str) {
        let mut form = YearForm::default();
        let action = form.fill(&mut Cursor::new(script), &mut Vec::new()).unwrap();
        assert_eq!(action, FormAction::Quit);
    }

    #[test]
    fn test_year_choices() {
        let choices = year_choices();
        assert!(choices.starts_with("2024 2023"));
        assert!(choices.ends_with("2011 2010"));
    }
}
