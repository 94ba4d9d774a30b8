//! Resolution of nominal boundaries against observed grades.
//!
//! A nominal boundary such as `3.0` rarely matches a grade in the data. Each
//! boundary is therefore replaced by a representative drawn from the data:
//! the lowest grade inside `[boundary, boundary + width]`, or failing that
//! the lowest grade above the range. Boundaries with neither are dropped,
//! except the topmost one, which is kept as an empty band.

use tracing::debug;

use crate::grade::Grade;

/// Resolves a single nominal boundary.
///
/// `sorted` must hold every observed grade in ascending order. Returns
/// `None` when no observed grade is at or above `boundary`.
#[expect(clippy::float_arithmetic, reason = "the range ends at boundary plus width")]
pub(crate) fn resolve_boundary(boundary: Grade, width: f64, sorted: &[Grade]) -> Option<Grade> {
    let upper = boundary.get() + width;

    // The first grade >= boundary is both the in-range minimum (when it is
    // <= upper) and the smallest grade strictly above the range otherwise.
    let first_at_or_above = sorted.partition_point(|grade| grade.get() < boundary.get());
    let candidate = *sorted.get(first_at_or_above)?;
    if candidate.get() <= upper {
        return Some(candidate);
    }
    sorted
        .get(first_at_or_above..)?
        .iter()
        .copied()
        .find(|grade| grade.get() > upper)
}

/// Resolves every boundary and returns the distinct representatives in
/// ascending order.
///
/// `boundaries` must be sorted ascending; its last element is the topmost
/// boundary and survives resolution even when nothing qualifies.
pub(crate) fn resolve_representatives(
    boundaries: &[Grade],
    width: f64,
    observed: &[Grade],
) -> Vec<Grade> {
    let mut sorted = observed.to_vec();
    sorted.sort_unstable();

    let topmost = boundaries.last().copied();
    let mut resolved = Vec::with_capacity(boundaries.len());
    for &boundary in boundaries {
        match resolve_boundary(boundary, width, &sorted) {
            Some(representative) => {
                debug!(%boundary, %representative, "boundary resolved");
                resolved.push(representative);
            }
            None if Some(boundary) == topmost => {
                debug!(%boundary, "topmost boundary kept without data");
                resolved.push(boundary);
            }
            None => debug!(%boundary, "boundary dropped, no grade at or above it"),
        }
    }

    resolved.sort_unstable();
    resolved.dedup_by(|later, earlier| later.approx_eq(*earlier));
    resolved
}
