//! Constrained DTW distance and nearest-neighbour search.
//!
//! Pure math library with zero I/O. Computes Dynamic Time Warping distances
//! restricted to a Sakoe-Chiba band, using absolute difference as the local
//! cost, and selects the candidate sequence nearest a query.

mod band;
mod distance;
mod dtw;
mod error;
mod search;
mod series;

pub use band::SakoeChibaBand;
pub use distance::DtwDistance;
pub use dtw::{distance, l1_distance, Dtw};
pub use error::DtwError;
pub use search::{nearest_neighbour, NearestNeighbourSearch, SearchResult};
pub use series::{TimeSeries, TimeSeriesView};
