//! JSON result writer for search reports.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::domain::ExperimentName;
use crate::report::SearchReport;
use crate::IoError;

/// Writes search reports to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_search.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Path of the file [`write_search`](Self::write_search) produces.
    #[must_use]
    pub fn search_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_search.json", self.experiment.as_str()))
    }

    /// Write a search report to `{experiment}_search.json` and return its path.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | The report cannot be serialized |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all)]
    pub fn write_search(&self, report: &SearchReport) -> Result<PathBuf, IoError> {
        let path = self.search_path();
        let json = report.to_json()?;
        fs::write(&path, json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "search result written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer =
            ResultWriter::new(&nested, ExperimentName::new("exp".into()).unwrap()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(writer.search_path(), nested.join("exp_search.json"));
    }

    #[test]
    fn output_dir_blocked_by_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();
        let result = ResultWriter::new(&file.join("sub"), ExperimentName::new("exp".into()).unwrap());
        assert!(matches!(result, Err(IoError::OutputDirCreate { .. })));
    }
}
