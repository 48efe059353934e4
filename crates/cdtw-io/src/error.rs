//! I/O error types for cdtw-io.

use std::path::PathBuf;

use cdtw_engine::DtwError;

/// Errors from sequence loading, radius parsing, dataset generation, and result output.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file has a header but no data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has a different number of columns than the header.
    #[error("inconsistent row length in {path}: row {row_index} (sequence {id}) has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Sequence ID of the offending row.
        id: String,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a cell is NaN, infinite, or not a float at all.
    #[error("non-finite value in {path}: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based column index (excluding the ID column).
        col_index: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when the same sequence ID appears more than once.
    #[error("duplicate sequence ID \"{id}\" in {path}: first at row {first_row}, again at row {second_row}")]
    DuplicateSequenceId {
        /// Path to the CSV file.
        path: PathBuf,
        /// The duplicated ID.
        id: String,
        /// Zero-based row index of the first occurrence.
        first_row: usize,
        /// Zero-based row index of the second occurrence.
        second_row: usize,
    },

    /// Returned when a requested sequence ID is not in the dataset.
    #[error("no sequence with ID \"{id}\"")]
    UnknownSequenceId {
        /// The requested ID.
        id: String,
    },

    /// Returned when a radius specification cannot be parsed.
    #[error("invalid radius \"{raw}\": {reason}")]
    InvalidRadius {
        /// The raw specification.
        raw: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Returned when the synthetic noise level is negative or not finite.
    #[error("noise standard deviation must be finite and non-negative, got {std}")]
    InvalidNoise {
        /// The rejected standard deviation.
        std: f64,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a report cannot be serialized to JSON.
    #[error("cannot serialize report")]
    Serialize(#[source] serde_json::Error),

    /// Wraps a DTW error, e.g. a sequence that fails validation or a negative radius.
    #[error("DTW error: {0}")]
    Dtw(#[from] DtwError),
}
