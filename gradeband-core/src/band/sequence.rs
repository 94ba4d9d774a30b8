//! Assignment of records to resolved bands.

use tracing::warn;

use crate::{grade::Grade, record::StudentRecord};

use super::Band;

/// Places every record into the first band whose range contains it.
///
/// Bands are scanned in ascending representative order and records are
/// appended in ingestion order. Returns the bands and the number of records
/// that matched none of them.
pub(crate) fn assign_records(
    records: &[StudentRecord],
    representatives: &[Grade],
    width: f64,
) -> (Vec<Band>, usize) {
    let mut bands: Vec<Band> = representatives
        .iter()
        .map(|&representative| Band::new(representative))
        .collect();
    let mut unassigned = 0_usize;

    for record in records {
        match bands.iter_mut().find(|band| band.admits(record.gpa(), width)) {
            Some(band) => band.push(record.clone()),
            None => {
                warn!(
                    id = record.id(),
                    gpa = %record.gpa(),
                    "record matches no band and was dropped"
                );
                unassigned += 1;
            }
        }
    }

    for band in &mut bands {
        band.settle_primary();
    }
    (bands, unassigned)
}

#[cfg(test)]
#[expect(clippy::indexing_slicing, reason = "tests address bands by position")]
mod tests {
    use super::*;
    use crate::grade::DEFAULT_BAND_WIDTH;

    fn record(id: &str, gpa: f64) -> StudentRecord {
        StudentRecord::try_new(id, 1, gpa).expect("fixture record is valid")
    }

    fn ids(band: &Band) -> Vec<&str> {
        band.members().iter().map(StudentRecord::id).collect()
    }

    #[test]
    fn first_matching_band_wins_for_overlapping_ranges() {
        // Representatives 0.5 and 1.0 overlap on [1.0, 1.49].
        let representatives = [Grade::new(0.5), Grade::new(1.0)];
        let records = [record("A", 1.2), record("B", 1.0), record("C", 1.7)];
        let (bands, unassigned) = assign_records(&records, &representatives, DEFAULT_BAND_WIDTH);

        assert_eq!(unassigned, 0);
        assert_eq!(ids(&bands[0]), vec!["A", "B"]);
        assert_eq!(ids(&bands[1]), vec!["C"]);
        // Nothing in band 1.0 equals 1.0, so its first member is primary.
        assert_eq!(bands[1].primary().map(StudentRecord::id), Some("C"));
    }

    #[test]
    fn first_exact_match_becomes_primary() {
        let representatives = [Grade::new(2.0)];
        let records = [record("A", 2.4), record("B", 2.0), record("C", 2.0)];
        let (bands, _) = assign_records(&records, &representatives, DEFAULT_BAND_WIDTH);

        assert_eq!(bands[0].primary_index(), Some(1));
        assert_eq!(bands[0].primary().map(StudentRecord::id), Some("B"));
    }

    #[test]
    fn counts_records_outside_every_band() {
        let representatives = [Grade::new(1.0)];
        let records = [record("low", 0.3), record("in", 1.5), record("high", 3.9)];
        let (bands, unassigned) = assign_records(&records, &representatives, DEFAULT_BAND_WIDTH);

        assert_eq!(unassigned, 2);
        assert_eq!(ids(&bands[0]), vec!["in"]);
    }

    #[test]
    fn empty_band_has_no_primary() {
        let (bands, unassigned) = assign_records(&[], &[Grade::new(4.0)], DEFAULT_BAND_WIDTH);
        assert_eq!(unassigned, 0);
        assert!(bands[0].is_empty());
        assert!(bands[0].primary().is_none());
    }
}
