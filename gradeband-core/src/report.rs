//! Band report model.
//!
//! [`BandReport`] describes every band in ascending order: its primary (or a
//! sentinel when the band is empty), the remaining members with their offset
//! from the representative, and a link to the next band's primary with the
//! gap between them. The model serializes with `serde` and each entry also
//! renders as a single `" -> "` chain:
//!
//! ```text
//! (3.0, S1, 1) -> (3.4, S2, 2)|0.4 -> (4.0, noval_nHEAD, noval_nHEAD)|nowei_nHead
//! ```
//!
//! Offsets and gaps are rounded to two decimals.

use std::fmt;

use serde::Serialize;

use crate::{
    band::{Band, BandedRecords},
    grade::{Decimal, Grade, round_hundredths},
    record::StudentRecord,
};

const HEAD_SENTINEL: &str = "noval_HEAD";
const NEXT_SENTINEL: &str = "noval_nHEAD";
const NO_WEIGHT: &str = "nowei_nHead";

/// A record rendered as `(gpa, id, year)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StudentTuple {
    gpa: Grade,
    id: String,
    year: u32,
}

impl StudentTuple {
    /// Returns the grade.
    #[must_use]
    #[rustfmt::skip]
    pub const fn gpa(&self) -> Grade { self.gpa }

    /// Returns the identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> &str { &self.id }

    /// Returns the year of study.
    #[must_use]
    #[rustfmt::skip]
    pub const fn year(&self) -> u32 { self.year }
}

impl From<&StudentRecord> for StudentTuple {
    fn from(record: &StudentRecord) -> Self {
        Self {
            gpa: record.gpa(),
            id: record.id().to_owned(),
            year: record.year(),
        }
    }
}

impl fmt::Display for StudentTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.gpa, self.id, self.year)
    }
}

/// First part of a band line.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadEntry {
    /// The band's primary record.
    Primary {
        /// The primary record.
        student: StudentTuple,
    },
    /// The band is empty; its representative is the boundary itself.
    Missing {
        /// The representative boundary.
        boundary: Grade,
    },
}

impl fmt::Display for HeadEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary { student } => write!(f, "{student}"),
            Self::Missing { boundary } => {
                write!(f, "({boundary}, {HEAD_SENTINEL}, {HEAD_SENTINEL})")
            }
        }
    }
}

/// A non-primary member with its rounded offset from the representative.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberEntry {
    student: StudentTuple,
    offset: f64,
}

impl MemberEntry {
    /// Returns the member.
    #[must_use]
    #[rustfmt::skip]
    pub const fn student(&self) -> &StudentTuple { &self.student }

    /// Returns `gpa - representative`, rounded to two decimals.
    #[must_use]
    #[rustfmt::skip]
    pub const fn offset(&self) -> f64 { self.offset }
}

impl fmt::Display for MemberEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.student, Decimal(self.offset))
    }
}

/// Link from a band to the next band up.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextEntry {
    /// The next band's primary and its rounded gap from this representative.
    Primary {
        /// The next band's primary record.
        student: StudentTuple,
        /// `next_primary.gpa - representative`, rounded to two decimals.
        gap: f64,
    },
    /// The next band is empty.
    Missing {
        /// The next band's representative.
        boundary: Grade,
    },
}

impl fmt::Display for NextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary { student, gap } => write!(f, "{student}|{}", Decimal(*gap)),
            Self::Missing { boundary } => {
                write!(f, "({boundary}, {NEXT_SENTINEL}, {NEXT_SENTINEL})|{NO_WEIGHT}")
            }
        }
    }
}

/// One band of the report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandEntry {
    representative: Grade,
    head: HeadEntry,
    members: Vec<MemberEntry>,
    next: Option<NextEntry>,
}

impl BandEntry {
    #[expect(clippy::float_arithmetic, reason = "offsets and gaps are grade differences")]
    fn new(band: &Band, next_band: Option<&Band>) -> Self {
        let representative = band.representative();
        let head = band.primary().map_or(
            HeadEntry::Missing {
                boundary: representative,
            },
            |primary| HeadEntry::Primary {
                student: primary.into(),
            },
        );
        let members = band
            .secondary_members()
            .map(|member| MemberEntry {
                student: member.into(),
                offset: round_hundredths(member.gpa().get() - representative.get()),
            })
            .collect();
        let next = next_band.map(|upper| {
            upper.primary().map_or(
                NextEntry::Missing {
                    boundary: upper.representative(),
                },
                |primary| NextEntry::Primary {
                    student: primary.into(),
                    gap: round_hundredths(primary.gpa().get() - representative.get()),
                },
            )
        });
        Self {
            representative,
            head,
            members,
            next,
        }
    }

    /// Returns the band's representative.
    #[must_use]
    #[rustfmt::skip]
    pub const fn representative(&self) -> Grade { self.representative }

    /// Returns the head part.
    #[must_use]
    #[rustfmt::skip]
    pub const fn head(&self) -> &HeadEntry { &self.head }

    /// Returns the non-primary members in ingestion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn members(&self) -> &[MemberEntry] { &self.members }

    /// Returns the link to the next band; `None` for the last band.
    #[must_use]
    #[rustfmt::skip]
    pub const fn next(&self) -> Option<&NextEntry> { self.next.as_ref() }
}

impl fmt::Display for BandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for member in &self.members {
            write!(f, " -> {member}")?;
        }
        if let Some(next) = &self.next {
            write!(f, " -> {next}")?;
        }
        Ok(())
    }
}

/// Report over every band of a [`BandedRecords`].
///
/// # Examples
/// ```
/// use gradeband_core::{BandReport, BandingBuilder, StudentRecord};
///
/// let banding = BandingBuilder::new().with_boundaries([3.0, 4.0]).build()?;
/// let records = vec![
///     StudentRecord::try_new("S1", 1, 3.0)?,
///     StudentRecord::try_new("S2", 2, 3.4)?,
/// ];
/// let report = BandReport::from_bands(&banding.partition(&records));
/// let lines = report.lines();
/// assert_eq!(lines[0].0, "3.0");
/// assert_eq!(
///     lines[0].1,
///     "(3.0, S1, 1) -> (3.4, S2, 2)|0.4 -> (4.0, noval_nHEAD, noval_nHEAD)|nowei_nHead",
/// );
/// assert_eq!(lines[1].1, "(4.0, noval_HEAD, noval_HEAD)");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandReport {
    entries: Vec<BandEntry>,
    placeholder: Option<Grade>,
}

impl BandReport {
    /// Builds the report for `banded`.
    ///
    /// When no band is represented by the topmost nominal boundary (because
    /// the data resolved it to a different grade), a placeholder for that
    /// boundary is appended.
    #[must_use]
    pub fn from_bands(banded: &BandedRecords) -> Self {
        let bands = banded.bands();
        let entries = bands
            .iter()
            .enumerate()
            .map(|(index, band)| BandEntry::new(band, bands.get(index + 1)))
            .collect();
        let topmost = banded.topmost_boundary();
        let placeholder = (!banded
            .representatives()
            .any(|representative| representative.approx_eq(topmost)))
        .then_some(topmost);
        Self {
            entries,
            placeholder,
        }
    }

    /// Returns the band entries in ascending representative order.
    #[must_use]
    #[rustfmt::skip]
    pub fn entries(&self) -> &[BandEntry] { &self.entries }

    /// Returns the topmost boundary when it needed a placeholder line.
    #[must_use]
    #[rustfmt::skip]
    pub const fn placeholder(&self) -> Option<Grade> { self.placeholder }

    /// Returns `(key, line)` pairs: one per band keyed by its representative,
    /// then the placeholder line if any.
    #[must_use]
    pub fn lines(&self) -> Vec<(String, String)> {
        let mut lines: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|entry| (entry.representative.to_string(), entry.to_string()))
            .collect();
        if let Some(boundary) = self.placeholder {
            let head = HeadEntry::Missing { boundary };
            lines.push((boundary.to_string(), head.to_string()));
        }
        lines
    }
}

#[cfg(test)]
#[expect(clippy::indexing_slicing, reason = "tests address report lines by position")]
mod tests {
    use super::*;
    use crate::builder::BandingBuilder;

    fn record(id: &str, year: u32, gpa: f64) -> StudentRecord {
        StudentRecord::try_new(id, year, gpa).expect("fixture record is valid")
    }

    fn report(boundaries: &[f64], records: &[StudentRecord]) -> BandReport {
        let banding = BandingBuilder::new()
            .with_boundaries(boundaries.iter().copied())
            .build()
            .expect("boundaries are valid");
        BandReport::from_bands(&banding.partition(records))
    }

    #[test]
    fn primary_is_not_repeated_among_members() {
        let records = [record("A", 1, 2.5), record("B", 2, 2.0), record("C", 3, 2.2)];
        let lines = report(&[2.0], &records).lines();
        assert_eq!(
            lines,
            vec![(
                "2.0".to_owned(),
                "(2.0, B, 2) -> (2.5, A, 1)|0.5 -> (2.2, C, 3)|0.2".to_owned()
            )]
        );
    }

    #[test]
    fn links_to_next_primary_with_rounded_gap() {
        let records = [record("A", 1, 1.0), record("B", 1, 2.25)];
        let lines = report(&[1.0, 2.0], &records).lines();
        assert_eq!(lines[0].1, "(1.0, A, 1) -> (2.25, B, 1)|1.25");
        assert_eq!(lines[1].1, "(2.25, B, 1)");
    }

    #[test]
    fn offsets_round_halves_to_even() {
        let records = [record("A", 1, 2.0), record("B", 1, 2.125), record("C", 2, 2.375)];
        let lines = report(&[2.0], &records).lines();
        assert_eq!(lines[0].1, "(2.0, A, 1) -> (2.125, B, 1)|0.12 -> (2.375, C, 2)|0.38");
    }

    #[test]
    fn placeholder_added_when_topmost_resolves_elsewhere() {
        let records = [record("A", 4, 4.2)];
        let built = report(&[3.0, 4.0], &records);
        assert_eq!(built.placeholder(), Some(Grade::new(4.0)));
        let lines = built.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ("4.2".to_owned(), "(4.2, A, 4)".to_owned()));
        assert_eq!(lines[1], ("4.0".to_owned(), "(4.0, noval_HEAD, noval_HEAD)".to_owned()));
    }

    #[test]
    fn serializes_with_tagged_entries() {
        let built = report(&[4.0], &[]);
        let value = serde_json::to_value(&built).expect("report serializes");
        assert_eq!(value["entries"][0]["head"]["kind"], "missing");
        assert_eq!(value["entries"][0]["head"]["boundary"], 4.0);
        assert!(value["placeholder"].is_null());
    }
}
