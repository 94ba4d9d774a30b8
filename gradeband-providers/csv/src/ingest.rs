//! Row-level CSV parsing for the student record format.

use std::{io, iter::Enumerate};

use crate::errors::CsvProviderError;

pub(crate) const ID_COLUMN: &str = "Student ID";
pub(crate) const YEAR_COLUMN: &str = "Year of Study";
pub(crate) const GPA_COLUMN: &str = "GPA";

/// Fields of one logical row and whether a quoted field was left open.
struct Tokens {
    fields: Vec<String>,
    open: bool,
}

fn tokenize(text: &str) -> Tokens {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match (ch, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => quoted = false,
            ('"', false) if current.trim().is_empty() => {
                current.clear();
                quoted = true;
            }
            (',', false) => fields.push(std::mem::take(&mut current).trim().to_owned()),
            (other, _) => current.push(other),
        }
    }
    fields.push(current.trim().to_owned());
    Tokens {
        fields,
        open: quoted,
    }
}

/// Splits one logical CSV row into trimmed fields.
///
/// Fields may be wrapped in double quotes, in which case commas and line
/// breaks are literal and `""` stands for one quote.
pub(crate) fn split_fields(
    line: &str,
    line_number: usize,
) -> Result<Vec<String>, CsvProviderError> {
    let tokens = tokenize(line);
    if tokens.open {
        return Err(CsvProviderError::UnterminatedQuote { line: line_number });
    }
    Ok(tokens.fields)
}

/// Joins physical lines into logical rows, so a quoted field may span line
/// breaks. Each row carries the 1-based number of its first line.
pub(crate) struct LogicalRows<I> {
    lines: Enumerate<I>,
}

impl<I> LogicalRows<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub(crate) fn new(lines: I) -> Self {
        Self {
            lines: lines.enumerate(),
        }
    }
}

impl<I> Iterator for LogicalRows<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<(usize, String), CsvProviderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, first) = self.lines.next()?;
        let line_number = index + 1;
        let mut row = match first {
            Ok(line) => line,
            Err(err) => return Some(Err(err.into())),
        };
        while tokenize(&row).open {
            match self.lines.next() {
                Some((_, Ok(line))) => {
                    row.push('\n');
                    row.push_str(&line);
                }
                Some((_, Err(err))) => return Some(Err(err.into())),
                None => return Some(Err(CsvProviderError::UnterminatedQuote { line: line_number })),
            }
        }
        Some(Ok((line_number, row)))
    }
}

/// Positions of the required columns within a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub(crate) id: usize,
    pub(crate) year: usize,
    pub(crate) gpa: usize,
}

impl ColumnIndex {
    /// Locates the required columns in `header`, in any order. Extra columns
    /// are ignored and a leading byte-order mark is stripped.
    pub(crate) fn from_header(header: &str) -> Result<Self, CsvProviderError> {
        let header = header.strip_prefix('\u{feff}').unwrap_or(header);
        let names = split_fields(header, 1)?;
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| name == column)
                .ok_or(CsvProviderError::MissingColumn { column })
        };
        Ok(Self {
            id: find(ID_COLUMN)?,
            year: find(YEAR_COLUMN)?,
            gpa: find(GPA_COLUMN)?,
        })
    }
}

/// A row with its three required values, still as text.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RawRow<'a> {
    pub(crate) id: &'a str,
    pub(crate) year: &'a str,
    pub(crate) gpa: &'a str,
}

pub(crate) fn select<'a>(
    fields: &'a [String],
    columns: ColumnIndex,
    line: usize,
) -> Result<RawRow<'a>, CsvProviderError> {
    let pick = |index: usize, column: &'static str| {
        fields
            .get(index)
            .map(String::as_str)
            .ok_or(CsvProviderError::MissingField { line, column })
    };
    Ok(RawRow {
        id: pick(columns.id, ID_COLUMN)?,
        year: pick(columns.year, YEAR_COLUMN)?,
        gpa: pick(columns.gpa, GPA_COLUMN)?,
    })
}
