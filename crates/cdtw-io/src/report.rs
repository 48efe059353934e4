//! Human-readable and JSON reporting of nearest-neighbour search results.

use std::io::{self, Write};

use cdtw_engine::{SearchResult, TimeSeries};
use serde::Serialize;

use crate::domain::{Dataset, SequenceId};
use crate::IoError;

/// One compared candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateEntry {
    /// Position in the candidate list.
    pub index: usize,
    /// Sequence ID.
    pub id: String,
    /// DTW distance to the query.
    pub distance: f64,
    /// Raw values.
    pub values: Vec<f64>,
}

/// Search outcome joined with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    /// Resolved band radius.
    pub radius: usize,
    /// Length shared by the query and every candidate.
    pub sequence_length: usize,
    /// ID of the query sequence.
    pub query_id: String,
    /// Query values.
    pub query: Vec<f64>,
    /// Index of the nearest candidate.
    pub best_index: usize,
    /// ID of the nearest candidate.
    pub best_id: String,
    /// Distance to the nearest candidate.
    pub best_distance: f64,
    /// Every candidate with its distance, in input order.
    pub candidates: Vec<CandidateEntry>,
}

impl SearchReport {
    /// Build a report from a finished search.
    ///
    /// `candidates` must be the dataset the search ran over.
    #[must_use]
    pub fn new(
        query_id: &SequenceId,
        query: &TimeSeries,
        candidates: &Dataset,
        radius: usize,
        result: &SearchResult,
    ) -> Self {
        debug_assert_eq!(candidates.len(), result.len());
        let entries = candidates
            .ids
            .iter()
            .zip(&candidates.series)
            .zip(&result.distances)
            .enumerate()
            .map(|(index, ((id, series), d))| CandidateEntry {
                index,
                id: id.to_string(),
                distance: d.value(),
                values: series.as_ref().to_vec(),
            })
            .collect();

        Self {
            radius,
            sequence_length: query.len(),
            query_id: query_id.to_string(),
            query: query.as_ref().to_vec(),
            best_index: result.best_index,
            best_id: candidates.ids[result.best_index].to_string(),
            best_distance: result.best_distance().value(),
            candidates: entries,
        }
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, IoError> {
        serde_json::to_string_pretty(self).map_err(IoError::Serialize)
    }

    /// Render the report as text: data set, query, distances, best match.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn render_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Band radius r={} (sequence length {})", self.radius, self.sequence_length)?;

        writeln!(out, "\nData set:")?;
        for c in &self.candidates {
            writeln!(out, "<{}> {}: {}", c.index, c.id, format_values(&c.values))?;
        }

        writeln!(out, "\nQuery sequence ({}):", self.query_id)?;
        writeln!(out, "{}", format_values(&self.query))?;

        writeln!(out, "\nDistances:")?;
        for c in &self.candidates {
            writeln!(out, "<{}> {}: {}", c.index, c.id, c.distance)?;
        }

        writeln!(out, "Best match was sequence <{}> ({})", self.best_index, self.best_id)
    }
}

/// Format values at two decimals, e.g. `[1.00 -0.25]`.
fn format_values(values: &[f64]) -> String {
    let body: Vec<String> = values.iter().map(|v| format!("{v:.2}")).collect();
    format!("[{}]", body.join(" "))
}
