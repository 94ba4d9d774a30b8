use gradeband_core::RecordError;
use thiserror::Error;

/// Errors raised while reading student records from CSV.
///
/// Line numbers are 1-based and count the header.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CsvProviderError {
    #[error("input has no header row")]
    EmptyInput,
    #[error("header is missing required column `{column}`")]
    MissingColumn { column: &'static str },
    #[error("line {line} has no value for column `{column}`")]
    MissingField { line: usize, column: &'static str },
    #[error("line {line}: `{value}` is not a valid year of study")]
    InvalidYear { line: usize, value: String },
    #[error("line {line}: `{value}` is not a valid GPA")]
    InvalidGpa { line: usize, value: String },
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
