//! Banding orchestration for the gradeband library.
//!
//! Provides the [`Banding`] entry point that resolves boundaries, partitions
//! records into bands, and builds the grade graph from the result.

use tracing::{Span, field, info, instrument, warn};

use crate::{
    band::{BandedRecords, assign_records, resolve_representatives},
    grade::Grade,
    graph::GradeGraph,
    record::{RecordSource, StudentRecord},
};

/// Entry point for partitioning records into grade bands.
///
/// # Examples
/// ```
/// use gradeband_core::{BandingBuilder, StudentRecord, VecSource};
///
/// let banding = BandingBuilder::new().build().expect("defaults are valid");
/// let source = VecSource::new(
///     "demo",
///     vec![
///         StudentRecord::try_new("S1", 1, 2.0)?,
///         StudentRecord::try_new("S2", 3, 2.6)?,
///     ],
/// );
/// let banded = banding.run(&source);
/// let graph = banding.build_graph(&banded);
/// assert_eq!(banded.record_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), gradeband_core::RecordError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Banding {
    boundaries: Vec<Grade>,
    band_width: f64,
    cross_band_edges: bool,
}

impl Banding {
    pub(crate) const fn new(
        boundaries: Vec<Grade>,
        band_width: f64,
        cross_band_edges: bool,
    ) -> Self {
        Self {
            boundaries,
            band_width,
            cross_band_edges,
        }
    }

    /// Returns the nominal boundaries in ascending order.
    #[must_use]
    pub fn boundaries(&self) -> &[Grade] {
        &self.boundaries
    }

    /// Returns the band width.
    #[must_use]
    pub const fn band_width(&self) -> f64 {
        self.band_width
    }

    /// Returns whether graph construction adds cross-band edges.
    #[must_use]
    pub const fn cross_band_edges(&self) -> bool {
        self.cross_band_edges
    }

    /// Returns the highest nominal boundary, the only one kept when nothing
    /// in the data resolves it.
    #[must_use]
    pub fn topmost_boundary(&self) -> Grade {
        // The builder rejects empty boundary sets.
        self.boundaries.last().copied().unwrap_or_default()
    }

    /// Resolves the nominal boundaries against `observed` grades and returns
    /// the distinct representatives in ascending order.
    ///
    /// Resolution depends only on the set of observed grades, so repeated
    /// calls with the same grades return the same representatives.
    ///
    /// # Examples
    /// ```
    /// use gradeband_core::{BandingBuilder, Grade};
    ///
    /// let banding = BandingBuilder::new().build().expect("defaults are valid");
    /// let observed = [Grade::new(3.2), Grade::new(2.5), Grade::new(3.9)];
    /// let representatives: Vec<f64> =
    ///     banding.resolve(&observed).into_iter().map(Grade::get).collect();
    /// assert_eq!(representatives, vec![2.5, 3.2, 4.0]);
    /// ```
    #[must_use]
    pub fn resolve(&self, observed: &[Grade]) -> Vec<Grade> {
        resolve_representatives(&self.boundaries, self.band_width, observed)
    }

    /// Partitions `records` into bands, preserving ingestion order inside
    /// each band.
    #[must_use]
    #[instrument(
        name = "core.partition",
        skip(self, records),
        fields(records = records.len(), bands = field::Empty, unassigned = field::Empty),
    )]
    pub fn partition(&self, records: &[StudentRecord]) -> BandedRecords {
        let observed: Vec<Grade> = records.iter().map(StudentRecord::gpa).collect();
        let representatives = self.resolve(&observed);
        let (bands, unassigned) = assign_records(records, &representatives, self.band_width);

        let span = Span::current();
        span.record("bands", bands.len());
        span.record("unassigned", unassigned);
        if unassigned > 0 {
            warn!(unassigned, "records outside every band were dropped");
        }

        BandedRecords::new(bands, self.band_width, self.topmost_boundary(), unassigned)
    }

    /// Partitions every record of `source`.
    #[must_use]
    #[instrument(
        name = "core.run",
        skip(self, source),
        fields(data_source = %source.name(), records = source.len()),
    )]
    pub fn run<S: RecordSource>(&self, source: &S) -> BandedRecords {
        if source.is_empty() {
            warn!(
                data_source = source.name(),
                "record source is empty, only the topmost boundary survives"
            );
        }
        let banded = self.partition(source.records());
        info!(
            data_source = source.name(),
            bands = banded.bands().len(),
            records = banded.record_count(),
            "banding completed"
        );
        banded
    }

    /// Builds the grade graph for `banded`, adding cross-band edges when the
    /// configuration enables them.
    #[must_use]
    #[instrument(
        name = "core.build_graph",
        skip(self, banded),
        fields(
            cross_band_edges = self.cross_band_edges,
            vertices = field::Empty,
            edges = field::Empty,
        ),
    )]
    pub fn build_graph(&self, banded: &BandedRecords) -> GradeGraph {
        let graph = GradeGraph::from_bands(banded, self.cross_band_edges);
        let span = Span::current();
        span.record("vertices", graph.vertex_count());
        span.record("edges", graph.edge_count());
        graph
    }
}
