//! Tests for error codes, messages, and grade display.
use gradeband_core::{
    AnalyticsError, AnalyticsErrorCode, BandingError, BandingErrorCode, Grade, GraphError,
    GraphErrorCode, RecordError, RecordErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(
    BandingError::EmptyBoundaries,
    BandingErrorCode::EmptyBoundaries,
    "BANDING_EMPTY_BOUNDARIES",
)]
#[case(
    BandingError::NonFiniteBoundary { value: f64::NAN },
    BandingErrorCode::NonFiniteBoundary,
    "BANDING_NON_FINITE_BOUNDARY",
)]
#[case(
    BandingError::InvalidBandWidth { value: -1.0 },
    BandingErrorCode::InvalidBandWidth,
    "BANDING_INVALID_BAND_WIDTH",
)]
fn returns_expected_banding_code(
    #[case] error: BandingError,
    #[case] expected: BandingErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(error.code().to_string(), text);
}

#[rstest]
#[case(RecordError::EmptyId, RecordErrorCode::EmptyId, "RECORD_EMPTY_ID")]
#[case(
    RecordError::NonFiniteGpa { id: "S1".to_owned(), value: f64::INFINITY },
    RecordErrorCode::NonFiniteGpa,
    "RECORD_NON_FINITE_GPA",
)]
fn returns_expected_record_code(
    #[case] error: RecordError,
    #[case] expected: RecordErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
}

#[rstest]
fn returns_expected_graph_code() {
    let error = GraphError::InvalidWeight {
        from: Grade::new(1.0),
        to: Grade::new(2.0),
        weight: -0.5,
    };
    assert_eq!(error.code(), GraphErrorCode::InvalidWeight);
    assert_eq!(error.to_string(), "edge 1.0 -> 2.0 has invalid weight -0.5");
}

#[rstest]
#[case(
    AnalyticsError::UnknownStartVertex { start: Grade::new(2.5) },
    AnalyticsErrorCode::UnknownStartVertex,
    "start vertex 2.5 is not present in the graph",
)]
#[case(
    AnalyticsError::VertexLimitExceeded { vertices: 10, limit: 4 },
    AnalyticsErrorCode::VertexLimitExceeded,
    "all-pairs analysis over 10 vertices exceeds the limit of 4",
)]
fn analytics_errors_carry_code_and_message(
    #[case] error: AnalyticsError,
    #[case] expected: AnalyticsErrorCode,
    #[case] message: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.to_string(), message);
}
