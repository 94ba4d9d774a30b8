//! Builder utilities for configuring [`Banding`] runs.
//!
//! Validates nominal boundaries and band width before a [`Banding`] is
//! constructed, so the resolution and partitioning stages can assume a
//! well-formed configuration.

use crate::{
    Result,
    banding::Banding,
    error::BandingError,
    grade::{DEFAULT_BAND_WIDTH, DEFAULT_BOUNDARIES, Grade},
};

/// Configures and constructs [`Banding`] instances.
///
/// # Examples
/// ```
/// use gradeband_core::BandingBuilder;
///
/// let banding = BandingBuilder::new()
///     .with_boundaries([0.0, 1.0])
///     .with_cross_band_edges(true)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(banding.boundaries().len(), 2);
/// assert!(banding.cross_band_edges());
/// ```
#[derive(Debug, Clone)]
pub struct BandingBuilder {
    boundaries: Vec<f64>,
    band_width: f64,
    cross_band_edges: bool,
}

impl Default for BandingBuilder {
    fn default() -> Self {
        Self {
            boundaries: DEFAULT_BOUNDARIES.to_vec(),
            band_width: DEFAULT_BAND_WIDTH,
            cross_band_edges: false,
        }
    }
}

impl BandingBuilder {
    /// Creates a builder with the five nominal boundaries `0.0..=4.0`, a band
    /// width of `0.99`, and no cross-band edges.
    ///
    /// # Examples
    /// ```
    /// use gradeband_core::BandingBuilder;
    ///
    /// let builder = BandingBuilder::new();
    /// assert_eq!(builder.boundaries(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(builder.band_width(), 0.99);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the nominal boundaries. Order and duplicates do not matter;
    /// they are sorted and collapsed by [`Self::build`].
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: impl IntoIterator<Item = f64>) -> Self {
        self.boundaries = boundaries.into_iter().collect();
        self
    }

    /// Returns the configured nominal boundaries.
    #[must_use]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Overrides the band width.
    #[must_use]
    pub const fn with_band_width(mut self, width: f64) -> Self {
        self.band_width = width;
        self
    }

    /// Returns the configured band width.
    #[must_use]
    pub const fn band_width(&self) -> f64 {
        self.band_width
    }

    /// Enables representative-to-primary edges between adjacent bands when
    /// building the grade graph.
    #[must_use]
    pub const fn with_cross_band_edges(mut self, enabled: bool) -> Self {
        self.cross_band_edges = enabled;
        self
    }

    /// Validates the configuration and constructs a [`Banding`] instance.
    ///
    /// # Errors
    /// Returns [`BandingError::EmptyBoundaries`] when no boundaries remain,
    /// [`BandingError::NonFiniteBoundary`] for NaN or infinite boundaries, and
    /// [`BandingError::InvalidBandWidth`] when the width is not a positive
    /// finite number.
    ///
    /// # Examples
    /// ```
    /// use gradeband_core::{BandingBuilder, BandingError};
    ///
    /// let err = BandingBuilder::new().with_band_width(0.0).build().unwrap_err();
    /// assert!(matches!(err, BandingError::InvalidBandWidth { .. }));
    /// ```
    pub fn build(self) -> Result<Banding> {
        if self.boundaries.is_empty() {
            return Err(BandingError::EmptyBoundaries);
        }
        if let Some(&value) = self.boundaries.iter().find(|value| !value.is_finite()) {
            return Err(BandingError::NonFiniteBoundary { value });
        }
        if !(self.band_width.is_finite() && self.band_width > 0.0) {
            return Err(BandingError::InvalidBandWidth {
                value: self.band_width,
            });
        }

        let mut boundaries: Vec<Grade> = self.boundaries.into_iter().map(Grade::new).collect();
        boundaries.sort_unstable();
        boundaries.dedup_by(|later, earlier| later.approx_eq(*earlier));

        Ok(Banding::new(
            boundaries,
            self.band_width,
            self.cross_band_edges,
        ))
    }
}
