//! Construction of a [`GradeGraph`] from banded records.

use crate::{band::BandedRecords, grade::Grade};

use super::GradeGraph;

impl GradeGraph {
    /// Builds the graph for `banded`.
    ///
    /// Every representative becomes a vertex, even for empty bands. Within a
    /// band, each consecutive pair of members `(a, b)` in ingestion order adds
    /// the edge `a.gpa -> b.gpa` weighted `|b.gpa - a.gpa|`, so a band of `k`
    /// members contributes `k - 1` edges. Duplicate grades collapse onto one
    /// vertex and the resulting parallel edges and self-loops are kept.
    ///
    /// With `cross_band_edges`, each representative also links to the
    /// primary grade of the next band up, when that band has one.
    ///
    /// # Examples
    /// ```
    /// use gradeband_core::{BandingBuilder, Grade, StudentRecord};
    ///
    /// let banding = BandingBuilder::new().with_boundaries([3.0, 4.0]).build()?;
    /// let records = vec![
    ///     StudentRecord::try_new("S1", 1, 3.0)?,
    ///     StudentRecord::try_new("S2", 2, 3.4)?,
    ///     StudentRecord::try_new("S3", 1, 3.4)?,
    /// ];
    /// let graph = banding.build_graph(&banding.partition(&records));
    /// assert_eq!(graph.vertices(), &[Grade::new(3.0), Grade::new(3.4), Grade::new(4.0)]);
    /// assert_eq!(graph.edge_count(), 2);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn from_bands(banded: &BandedRecords, cross_band_edges: bool) -> Self {
        let mut graph = Self::new();
        for band in banded.bands() {
            graph.add_vertex(band.representative());
            for member in band.members() {
                graph.add_vertex(member.gpa());
            }
            for pair in band.members().windows(2) {
                if let [from, to] = pair {
                    graph.push_edge(from.gpa(), to.gpa(), from.gpa().distance_to(to.gpa()));
                }
            }
        }

        if cross_band_edges {
            for pair in banded.bands().windows(2) {
                let [lower, upper] = pair else { continue };
                let Some(primary) = upper.primary() else { continue };
                let from: Grade = lower.representative();
                graph.push_edge(from, primary.gpa(), from.distance_to(primary.gpa()));
            }
        }
        graph
    }
}
