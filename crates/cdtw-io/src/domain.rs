//! Domain types for cdtw-io.

use cdtw_engine::TimeSeries;

use crate::IoError;

/// A sequence identifier, taken from the first column of an input CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceId(String);

impl SequenceId {
    /// Create a new sequence ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named sequences in input order. `ids[i]` labels `series[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Sequence identifiers in insertion order.
    pub ids: Vec<SequenceId>,
    /// Sequence values, parallel to `ids`.
    pub series: Vec<TimeSeries>,
}

impl Dataset {
    /// Return the number of sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Return true if the dataset holds no sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Return the position of the sequence with the given ID.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s.as_str() == id)
    }

    /// Select one sequence by ID, or the first one when `id` is `None`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::UnknownSequenceId`] | `id` is not present |
    /// | [`IoError::EmptyDataset`] | The dataset is empty and no ID was given |
    pub fn select(&self, id: Option<&str>) -> Result<(&SequenceId, &TimeSeries), IoError> {
        let index = match id {
            Some(id) => self
                .position(id)
                .ok_or_else(|| IoError::UnknownSequenceId { id: id.to_string() })?,
            None if self.is_empty() => {
                return Err(IoError::EmptyDataset {
                    path: "<in-memory>".into(),
                });
            }
            None => 0,
        };
        Ok((&self.ids[index], &self.series[index]))
    }
}
