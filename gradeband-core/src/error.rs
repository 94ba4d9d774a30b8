//! Error types for the gradeband core library.
//!
//! Defines error enums exposed by the public API, their stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::grade::Grade;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!("Retrieve the stable [`", stringify!($CodeTy), "`] for this error.")]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while configuring a [`crate::Banding`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BandingError {
    /// No nominal boundaries were supplied.
    #[error("at least one nominal band boundary is required")]
    EmptyBoundaries,
    /// A nominal boundary was NaN or infinite.
    #[error("band boundary {value} is not a finite number")]
    NonFiniteBoundary {
        /// The offending boundary value.
        value: f64,
    },
    /// Band width must be a positive, finite number.
    #[error("band width must be positive and finite (got {value})")]
    InvalidBandWidth {
        /// The rejected width.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`BandingError`] variants.
    enum BandingErrorCode for BandingError {
        /// No nominal boundaries were supplied.
        EmptyBoundaries => EmptyBoundaries => "BANDING_EMPTY_BOUNDARIES",
        /// A nominal boundary was NaN or infinite.
        NonFiniteBoundary => NonFiniteBoundary { .. } => "BANDING_NON_FINITE_BOUNDARY",
        /// Band width must be a positive, finite number.
        InvalidBandWidth => InvalidBandWidth { .. } => "BANDING_INVALID_BAND_WIDTH",
    }
}

/// Error produced when a student record fails validation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RecordError {
    /// The student identifier was empty or whitespace.
    #[error("student identifier must not be empty")]
    EmptyId,
    /// The grade was NaN or infinite.
    #[error("student `{id}` has a non-finite GPA ({value})")]
    NonFiniteGpa {
        /// Identifier of the offending record.
        id: String,
        /// The rejected grade.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`RecordError`] variants.
    enum RecordErrorCode for RecordError {
        /// The student identifier was empty or whitespace.
        EmptyId => EmptyId => "RECORD_EMPTY_ID",
        /// The grade was NaN or infinite.
        NonFiniteGpa => NonFiniteGpa { .. } => "RECORD_NON_FINITE_GPA",
    }
}

/// Error produced when an edge is added to a [`crate::GradeGraph`] by hand.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// Edge weights must be finite and non-negative.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight {
        /// Source vertex.
        from: Grade,
        /// Destination vertex.
        to: Grade,
        /// The rejected weight.
        weight: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Edge weights must be finite and non-negative.
        InvalidWeight => InvalidWeight { .. } => "GRAPH_INVALID_WEIGHT",
    }
}

/// Error produced by the analytics suite.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalyticsError {
    /// The requested start vertex does not exist in the graph.
    #[error("start vertex {start} is not present in the graph")]
    UnknownStartVertex {
        /// The requested start grade.
        start: Grade,
    },
    /// All-pairs analysis was refused because the graph is too large.
    #[error("all-pairs analysis over {vertices} vertices exceeds the limit of {limit}")]
    VertexLimitExceeded {
        /// Vertex count of the graph.
        vertices: usize,
        /// Configured vertex limit.
        limit: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`AnalyticsError`] variants.
    enum AnalyticsErrorCode for AnalyticsError {
        /// The requested start vertex does not exist in the graph.
        UnknownStartVertex => UnknownStartVertex { .. } => "ANALYTICS_UNKNOWN_START_VERTEX",
        /// All-pairs analysis was refused because the graph is too large.
        VertexLimitExceeded => VertexLimitExceeded { .. } => "ANALYTICS_VERTEX_LIMIT_EXCEEDED",
    }
}

/// Convenient alias for results returned by the banding configuration API.
pub type Result<T> = core::result::Result<T, BandingError>;
