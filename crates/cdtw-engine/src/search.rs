//! Nearest-neighbour search under the constrained DTW distance.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::distance::DtwDistance;
use crate::dtw::Dtw;
use crate::error::DtwError;
use crate::series::{TimeSeries, TimeSeriesView};

/// Outcome of a nearest-neighbour search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Index of the closest candidate. Ties resolve to the lowest index.
    pub best_index: usize,
    /// Distance from the query to each candidate, in candidate order.
    pub distances: Vec<DtwDistance>,
}

impl SearchResult {
    /// Return the distance to the best candidate.
    #[must_use]
    pub fn best_distance(&self) -> DtwDistance {
        self.distances[self.best_index]
    }

    /// Return the number of candidates that were compared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Always `false` for a result produced by a search.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Finds the candidate closest to a query.
///
/// Construct via [`NearestNeighbourSearch::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter  | Default |
/// |------------|---------|
/// | `parallel` | true    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighbourSearch {
    dtw: Dtw,
    parallel: bool,
}

impl NearestNeighbourSearch {
    /// Create a search that compares candidates with `dtw`.
    #[must_use]
    pub fn new(dtw: Dtw) -> Self {
        Self {
            dtw,
            parallel: true,
        }
    }

    /// Evaluate candidates on the rayon thread pool (`true`) or on the calling thread.
    ///
    /// The result is identical either way.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Return the DTW calculator used for every comparison.
    #[must_use]
    pub fn dtw(&self) -> Dtw {
        self.dtw
    }

    /// Compute the distance from `query` to every candidate and pick the closest.
    ///
    /// All candidate lengths are checked before any distance is computed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptyCandidates`] | `candidates` is empty |
    /// | [`DtwError::CandidateLengthMismatch`] | A candidate's length differs from the query's |
    #[instrument(skip_all, fields(n_candidates = candidates.len(), radius = self.dtw.band().radius()))]
    pub fn search(
        &self,
        query: TimeSeriesView<'_>,
        candidates: &[TimeSeries],
    ) -> Result<SearchResult, DtwError> {
        if candidates.is_empty() {
            return Err(DtwError::EmptyCandidates);
        }
        if let Some((index, c)) = candidates
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != query.len())
        {
            return Err(DtwError::CandidateLengthMismatch {
                index,
                expected: query.len(),
                got: c.len(),
            });
        }

        let distances: Vec<DtwDistance> = if self.parallel {
            candidates
                .par_iter()
                .map(|c| self.dtw.distance(query, c.as_view()))
                .collect::<Result<_, _>>()?
        } else {
            candidates
                .iter()
                .map(|c| self.dtw.distance(query, c.as_view()))
                .collect::<Result<_, _>>()?
        };

        let best_index = argmin(&distances);
        debug!(best_index, best = %distances[best_index], "nearest neighbour found");

        Ok(SearchResult {
            best_index,
            distances,
        })
    }
}

/// Index of the smallest distance; the first occurrence wins ties.
fn argmin(distances: &[DtwDistance]) -> usize {
    let mut best = 0;
    for (i, d) in distances.iter().enumerate().skip(1) {
        if d.total_cmp(&distances[best]).is_lt() {
            best = i;
        }
    }
    best
}

/// Search `candidates` for the sequence nearest `query` under a band of `radius`.
///
/// # Errors
///
/// See [`NearestNeighbourSearch::search`].
pub fn nearest_neighbour(
    query: TimeSeriesView<'_>,
    candidates: &[TimeSeries],
    radius: usize,
) -> Result<SearchResult, DtwError> {
    NearestNeighbourSearch::new(Dtw::with_sakoe_chiba(radius)).search(query, candidates)
}
