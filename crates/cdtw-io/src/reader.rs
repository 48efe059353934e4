//! CSV sequence reader with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cdtw_engine::TimeSeries;
use tracing::{debug, info, instrument};

use crate::domain::{Dataset, SequenceId};
use crate::IoError;

/// Reads named sequences from a CSV file.
///
/// Expected CSV format:
/// - Header row required (first column is the sequence ID, remaining are positional time steps)
/// - `id,t0,t1,...,tn`
/// - One row per sequence, all rows must have the same number of columns
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::DuplicateSequenceId`] | Same ID appears twice |
pub struct SequenceReader {
    path: PathBuf,
}

impl SequenceReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    /// Read and validate the CSV file, returning a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that ragged rows surface as InconsistentRowLength
        // instead of a generic CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let expected_cols = rdr.headers().map_err(|e| self.csv_error(e))?.len();
        debug!(expected_cols, "read CSV header");

        let mut ids = Vec::new();
        let mut series = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;
            let id = record.get(0).unwrap_or("").to_string();

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    id,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            if let Some(&first_row) = seen.get(&id) {
                return Err(IoError::DuplicateSequenceId {
                    path: self.path.clone(),
                    id,
                    first_row,
                    second_row: row_index,
                });
            }
            seen.insert(id.clone(), row_index);

            let values = record
                .iter()
                .skip(1)
                .enumerate()
                .map(|(col_index, raw)| match raw.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(IoError::NonFiniteValue {
                        path: self.path.clone(),
                        row_index,
                        col_index,
                        raw: raw.to_string(),
                    }),
                })
                .collect::<Result<Vec<f64>, _>>()?;

            // A header with only the ID column leaves every row without values.
            if values.is_empty() {
                return Err(IoError::EmptyDataset {
                    path: self.path.clone(),
                });
            }

            ids.push(SequenceId::new(id));
            series.push(TimeSeries::new(values)?);
        }

        if ids.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_sequences = ids.len(),
            n_timesteps = expected_cols - 1,
            "dataset loaded"
        );

        Ok(Dataset { ids, series })
    }
}
