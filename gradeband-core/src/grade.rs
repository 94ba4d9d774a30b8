//! Grade values with a total order and tolerance-aware comparison.
//!
//! Grades are plain `f64` values underneath. [`Grade`] gives them `Eq`,
//! `Ord`, and `Hash` so they can key maps and act as graph vertices, while
//! [`Grade::approx_eq`] provides the tolerance comparison used wherever band
//! membership or primary selection depends on equality.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::Serialize;

/// Absolute tolerance applied when two grades must compare equal.
///
/// Band primaries are selected by comparing a record's grade against the
/// band representative; decimal grades such as `3.3` are not exactly
/// representable, so an exact comparison would miss them.
pub const GPA_TOLERANCE: f64 = 1e-9;

/// Nominal band boundaries used when none are configured.
pub const DEFAULT_BOUNDARIES: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];

/// Width of a band above its boundary: members satisfy
/// `boundary <= gpa <= boundary + width`.
pub const DEFAULT_BAND_WIDTH: f64 = 0.99;

/// A grade-point value.
///
/// Ordering and equality follow [`f64::total_cmp`], so two grades are equal
/// only when bitwise identical after `-0.0` is folded into `0.0`.
///
/// # Examples
/// ```
/// use gradeband_core::Grade;
///
/// let low = Grade::new(1.5);
/// let high = Grade::new(3.25);
/// assert!(low < high);
/// assert_eq!(high.to_string(), "3.25");
/// assert_eq!(Grade::new(4.0).to_string(), "4.0");
/// ```
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Grade(f64);

impl Grade {
    /// Wraps `value` as a grade.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        // Fold negative zero so that `0.0` and `-0.0` share a hash.
        if value == 0.0 { Self(0.0) } else { Self(value) }
    }

    /// Returns the underlying value.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> f64 { self.0 }

    /// Returns `true` when both grades differ by less than [`GPA_TOLERANCE`].
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "tolerance comparison needs a difference")]
    pub const fn approx_eq(self, other: Self) -> bool {
        (self.0 - other.0).abs() < GPA_TOLERANCE
    }

    /// Absolute difference between two grades.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "distance is the absolute difference")]
    pub const fn distance_to(self, other: Self) -> f64 {
        (other.0 - self.0).abs()
    }
}

impl From<f64> for Grade {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for Grade {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Grade {}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Grade {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_decimal(f, self.0)
    }
}

/// Rounds `value` to two decimal places, the precision used in reports.
///
/// Exact halves round to the even hundredth, so `0.125` becomes `0.12`.
///
/// # Examples
/// ```
/// use gradeband_core::round_hundredths;
///
/// assert_eq!(round_hundredths(0.123), 0.12);
/// assert_eq!(round_hundredths(0.126), 0.13);
/// assert_eq!(round_hundredths(0.125), 0.12);
/// assert_eq!(round_hundredths(0.375), 0.38);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "rounding scales by one hundred")]
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Writes `value` in shortest round-trip form, keeping one decimal for
/// integral values (`4.0` rather than `4`).
pub(crate) fn write_decimal(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

/// Wrapper that formats a raw `f64` the same way [`Grade`] does.
pub(crate) struct Decimal(pub(crate) f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_decimal(f, self.0)
    }
}
