//! Error types for banded DTW computation and nearest-neighbour search.

/// Errors from sequence validation, DTW distance computation, and nearest-neighbour search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a time series.
    #[error("time series must be non-empty")]
    EmptySeries,

    /// Returned when a time series contains NaN, infinity, or negative infinity.
    #[error("time series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when the two series passed to the engine differ in length.
    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first series.
        left: usize,
        /// Length of the second series.
        right: usize,
    },

    /// Returned when a search candidate differs in length from the query.
    #[error("candidate {index} has length {got}, query has length {expected}")]
    CandidateLengthMismatch {
        /// Position of the first offending candidate.
        index: usize,
        /// Length of the query series.
        expected: usize,
        /// Length of the offending candidate.
        got: usize,
    },

    /// Returned when a nearest-neighbour search is given no candidates.
    #[error("nearest-neighbour search needs at least one candidate")]
    EmptyCandidates,

    /// Returned when a band radius is built from a negative integer.
    #[error("band radius must be non-negative, got {radius}")]
    NegativeRadius {
        /// The rejected radius.
        radius: i64,
    },
}
