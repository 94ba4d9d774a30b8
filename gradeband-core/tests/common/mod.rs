use gradeband_core::{Grade, StudentRecord, VecSource};

#[must_use]
pub fn records(rows: &[(&str, u32, f64)]) -> Vec<StudentRecord> {
    rows.iter()
        .map(|&(id, year, gpa)| {
            StudentRecord::try_new(id, year, gpa).expect("fixture row is valid")
        })
        .collect()
}

#[must_use]
pub fn source(name: &str, rows: &[(&str, u32, f64)]) -> VecSource {
    VecSource::new(name, records(rows))
}

#[must_use]
pub fn g(value: f64) -> Grade {
    Grade::new(value)
}

#[must_use]
pub fn ids(records: &[StudentRecord]) -> Vec<&str> {
    records.iter().map(StudentRecord::id).collect()
}
