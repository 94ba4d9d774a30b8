//! CSV record provider implementation.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use gradeband_core::{RecordSource, StudentRecord};
use tracing::debug;

use crate::errors::CsvProviderError;
use crate::ingest::{ColumnIndex, LogicalRows, RawRow, select, split_fields};

/// Student records loaded from a CSV table with `Student ID`,
/// `Year of Study`, and `GPA` columns.
#[derive(Debug)]
pub struct CsvRecordProvider {
    name: String,
    records: Vec<StudentRecord>,
}

impl CsvRecordProvider {
    /// Reads records from `reader`, stopping after `max_rows` data rows when
    /// a limit is given. Blank lines are skipped and do not count. Quoted
    /// fields may span lines; errors cite the row's first line.
    ///
    /// # Errors
    /// Returns [`CsvProviderError`] when the header lacks a required column,
    /// a row is short or malformed, a value fails to parse, or reading fails.
    ///
    /// # Examples
    /// ```
    /// use gradeband_core::RecordSource;
    /// use gradeband_providers_csv::CsvRecordProvider;
    ///
    /// let csv = "Student ID,Year of Study,GPA\nS1,2,3.4\nS2,1,2.0\n";
    /// let provider = CsvRecordProvider::try_from_reader("demo", csv.as_bytes(), Some(1))?;
    /// assert_eq!(provider.len(), 1);
    /// assert_eq!(provider.records()[0].id(), "S1");
    /// # Ok::<(), gradeband_providers_csv::CsvProviderError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
        max_rows: Option<usize>,
    ) -> Result<Self, CsvProviderError> {
        let name = name.into();
        let mut rows = LogicalRows::new(reader.lines());
        let columns = loop {
            let Some(row) = rows.next() else {
                return Err(CsvProviderError::EmptyInput);
            };
            let (_, line) = row?;
            if !line.trim().is_empty() {
                break ColumnIndex::from_header(&line)?;
            }
        };

        let mut records = Vec::new();
        for row in rows {
            if max_rows.is_some_and(|limit| records.len() >= limit) {
                break;
            }
            let (line_number, line) = row?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_fields(&line, line_number)?;
            let raw = select(&fields, columns, line_number)?;
            records.push(parse_row(&raw, line_number)?);
        }

        debug!(data_source = %name, rows = records.len(), "csv records loaded");
        Ok(Self { name, records })
    }

    /// Opens `path` and reads it with [`Self::try_from_reader`].
    ///
    /// # Errors
    /// Returns [`CsvProviderError::Io`] when the file cannot be opened, and
    /// any error of [`Self::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        max_rows: Option<usize>,
    ) -> Result<Self, CsvProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file), max_rows)
    }

    /// Consumes the provider and returns its records.
    #[must_use]
    pub fn into_records(self) -> Vec<StudentRecord> {
        self.records
    }
}

fn parse_row(row: &RawRow<'_>, line: usize) -> Result<StudentRecord, CsvProviderError> {
    let year = row
        .year
        .parse::<u32>()
        .map_err(|_| CsvProviderError::InvalidYear {
            line,
            value: row.year.to_owned(),
        })?;
    let gpa = row
        .gpa
        .parse::<f64>()
        .map_err(|_| CsvProviderError::InvalidGpa {
            line,
            value: row.gpa.to_owned(),
        })?;
    StudentRecord::try_new(row.id, year, gpa)
        .map_err(|source| CsvProviderError::Record { line, source })
}

impl RecordSource for CsvRecordProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn records(&self) -> &[StudentRecord] {
        &self.records
    }
}
