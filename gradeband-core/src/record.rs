//! Student records and the record source abstraction.

use serde::Serialize;

use crate::{error::RecordError, grade::Grade};

/// One ingested row: identifier, year of study, and grade-point average.
///
/// Records are immutable once constructed.
///
/// # Examples
/// ```
/// use gradeband_core::StudentRecord;
///
/// let record = StudentRecord::try_new("S1", 2, 3.4)?;
/// assert_eq!(record.id(), "S1");
/// assert_eq!(record.year(), 2);
/// assert_eq!(record.gpa().get(), 3.4);
/// # Ok::<(), gradeband_core::RecordError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    id: String,
    year: u32,
    gpa: Grade,
}

impl StudentRecord {
    /// Validates and builds a record.
    ///
    /// # Errors
    /// Returns [`RecordError::EmptyId`] when `id` is blank and
    /// [`RecordError::NonFiniteGpa`] when `gpa` is NaN or infinite.
    pub fn try_new(id: impl Into<String>, year: u32, gpa: f64) -> Result<Self, RecordError> {
        let student_id: String = id.into();
        if student_id.trim().is_empty() {
            return Err(RecordError::EmptyId);
        }
        if !gpa.is_finite() {
            return Err(RecordError::NonFiniteGpa {
                id: student_id,
                value: gpa,
            });
        }
        Ok(Self {
            id: student_id,
            year,
            gpa: Grade::new(gpa),
        })
    }

    /// Returns the student identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> &str { &self.id }

    /// Returns the year of study.
    #[must_use]
    #[rustfmt::skip]
    pub const fn year(&self) -> u32 { self.year }

    /// Returns the grade-point average.
    #[must_use]
    #[rustfmt::skip]
    pub const fn gpa(&self) -> Grade { self.gpa }
}

/// An ordered batch of validated records, in file order.
///
/// Ingestion adapters implement this trait so the core can consume them
/// without knowing where the rows came from.
///
/// # Examples
/// ```
/// use gradeband_core::{RecordSource, StudentRecord, VecSource};
///
/// let source = VecSource::new("demo", vec![StudentRecord::try_new("S1", 1, 2.0)?]);
/// assert_eq!(source.name(), "demo");
/// assert_eq!(source.len(), 1);
/// assert!(!source.is_empty());
/// # Ok::<(), gradeband_core::RecordError>(())
/// ```
pub trait RecordSource {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the records in ingestion order.
    fn records(&self) -> &[StudentRecord];

    /// Returns the number of records.
    fn len(&self) -> usize {
        self.records().len()
    }

    /// Returns whether the source holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`RecordSource`].
#[derive(Clone, Debug, Default)]
pub struct VecSource {
    name: String,
    records: Vec<StudentRecord>,
}

impl VecSource {
    /// Wraps `records` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, records: Vec<StudentRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

impl RecordSource for VecSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn records(&self) -> &[StudentRecord] {
        &self.records
    }
}
