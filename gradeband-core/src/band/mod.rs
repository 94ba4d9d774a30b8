//! Grade bands and their ordered record sequences.
//!
//! This module covers the first two stages of the pipeline:
//!
//! - Resolving nominal boundaries into representative grades drawn from the
//!   data.
//! - Assigning each record to exactly one band, in ingestion order, and
//!   choosing each band's primary record.
//!
//! The resulting [`BandedRecords`] is built once and read by the graph
//! constructor, the analytics suite, and the report model.

mod resolver;
mod sequence;

use serde::Serialize;

use crate::{grade::Grade, record::StudentRecord};

pub(crate) use self::{resolver::resolve_representatives, sequence::assign_records};

/// A band anchored at a representative grade.
///
/// Members are kept in ingestion order. The primary, when present, is an
/// index into the member list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Band {
    representative: Grade,
    members: Vec<StudentRecord>,
    primary: Option<usize>,
}

impl Band {
    pub(crate) const fn new(representative: Grade) -> Self {
        Self {
            representative,
            members: Vec::new(),
            primary: None,
        }
    }

    /// Returns the representative grade that identifies this band.
    #[must_use]
    #[rustfmt::skip]
    pub const fn representative(&self) -> Grade { self.representative }

    /// Returns the members in ingestion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn members(&self) -> &[StudentRecord] { &self.members }

    /// Returns the number of members.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.members.len() }

    /// Returns whether the band has no members.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Returns the position of the primary record within [`Self::members`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn primary_index(&self) -> Option<usize> { self.primary }

    /// Returns the primary record: the first member whose grade equals the
    /// representative, or the first member when none does.
    #[must_use]
    pub fn primary(&self) -> Option<&StudentRecord> {
        self.primary.and_then(|index| self.members.get(index))
    }

    /// Returns the members other than the primary, in ingestion order.
    pub fn secondary_members(&self) -> impl Iterator<Item = &StudentRecord> {
        self.members
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != self.primary)
            .map(|(_, record)| record)
    }

    /// Returns `true` when `gpa` lies within `[representative, representative + width]`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the upper bound is representative plus width")]
    pub const fn admits(&self, gpa: Grade, width: f64) -> bool {
        let low = self.representative.get();
        low <= gpa.get() && gpa.get() <= low + width
    }

    pub(crate) fn push(&mut self, record: StudentRecord) {
        if self.primary.is_none() && record.gpa().approx_eq(self.representative) {
            self.primary = Some(self.members.len());
        }
        self.members.push(record);
    }

    pub(crate) fn settle_primary(&mut self) {
        if self.primary.is_none() && !self.members.is_empty() {
            self.primary = Some(0);
        }
    }
}

/// The bands produced by one [`crate::Banding`] run, in ascending
/// representative order.
///
/// # Examples
/// ```
/// use gradeband_core::{BandingBuilder, StudentRecord};
///
/// let banding = BandingBuilder::new().with_boundaries([0.0, 1.0]).build()?;
/// let records = vec![
///     StudentRecord::try_new("S1", 1, 0.0)?,
///     StudentRecord::try_new("S2", 2, 0.5)?,
///     StudentRecord::try_new("S3", 1, 1.0)?,
/// ];
/// let banded = banding.partition(&records);
/// assert_eq!(banded.bands().len(), 2);
/// assert_eq!(banded.bands()[0].len(), 2);
/// assert_eq!(banded.unassigned(), 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandedRecords {
    bands: Vec<Band>,
    band_width: f64,
    topmost_boundary: Grade,
    unassigned: usize,
}

impl BandedRecords {
    pub(crate) const fn new(
        bands: Vec<Band>,
        band_width: f64,
        topmost_boundary: Grade,
        unassigned: usize,
    ) -> Self {
        Self {
            bands,
            band_width,
            topmost_boundary,
            unassigned,
        }
    }

    /// Returns the bands in ascending representative order.
    #[must_use]
    #[rustfmt::skip]
    pub fn bands(&self) -> &[Band] { &self.bands }

    /// Looks up a band by its representative, within [`crate::GPA_TOLERANCE`].
    #[must_use]
    pub fn band(&self, representative: Grade) -> Option<&Band> {
        self.bands
            .iter()
            .find(|band| band.representative().approx_eq(representative))
    }

    /// Returns the representatives in ascending order.
    pub fn representatives(&self) -> impl Iterator<Item = Grade> + '_ {
        self.bands.iter().map(Band::representative)
    }

    /// Returns the band width used for membership.
    #[must_use]
    #[rustfmt::skip]
    pub const fn band_width(&self) -> f64 { self.band_width }

    /// Returns the highest configured nominal boundary.
    #[must_use]
    #[rustfmt::skip]
    pub const fn topmost_boundary(&self) -> Grade { self.topmost_boundary }

    /// Returns how many records fell outside every band and were dropped.
    #[must_use]
    #[rustfmt::skip]
    pub const fn unassigned(&self) -> usize { self.unassigned }

    /// Returns the number of records held across all bands.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.bands.iter().map(Band::len).sum()
    }
}
