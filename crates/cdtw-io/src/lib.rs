//! Input, radius parsing, synthetic data, and reporting for the cdtw pipeline.

mod domain;
mod error;
mod radius;
mod reader;
mod report;
mod synthetic;
mod writer;

pub use domain::{Dataset, ExperimentName, SequenceId};
pub use error::IoError;
pub use radius::RadiusSpec;
pub use reader::SequenceReader;
pub use report::{CandidateEntry, SearchReport};
pub use synthetic::{DEFAULT_LENGTH, DEFAULT_NOISE_STD, SyntheticDataset};
pub use writer::ResultWriter;
