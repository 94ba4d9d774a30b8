//! CSV provider for student record tables implementing `RecordSource`.

mod errors;
mod ingest;
mod provider;

pub use errors::CsvProviderError;
pub use provider::CsvRecordProvider;
