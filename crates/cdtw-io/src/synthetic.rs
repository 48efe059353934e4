//! Seeded synthetic dataset for demonstrating nearest-neighbour matching.

use std::f64::consts::PI;

use cdtw_engine::TimeSeries;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, instrument};

use crate::domain::{Dataset, SequenceId};
use crate::IoError;

/// Default number of samples per sequence.
pub const DEFAULT_LENGTH: usize = 40;

/// Default standard deviation of the additive Gaussian noise.
pub const DEFAULT_NOISE_STD: f64 = 0.1;

/// Four candidate shapes on `t = linspace(0, 6π, len)` plus a phase-shifted query.
///
/// | ID | Shape |
/// |---|---|
/// | `cos` | `cos(t) + ε` |
/// | `abs_cos` | `abs(cos(t)) + ε` |
/// | `square` | `sign(cos(t + 1.5))` |
/// | `noise` | `ε` |
/// | query | `cos(t + 2) + ε` |
///
/// `ε ~ N(0, noise_std)` is drawn independently for each noisy sequence.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    /// The candidate sequences.
    pub candidates: Dataset,
    /// ID of the query sequence.
    pub query_id: SequenceId,
    /// The query sequence.
    pub query: TimeSeries,
}

impl SyntheticDataset {
    /// Generate the dataset deterministically from `seed`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::InvalidNoise`] | `noise_std` is negative or not finite |
    /// | [`IoError::Dtw`] | `len` is zero |
    #[instrument]
    pub fn generate(len: usize, noise_std: f64, seed: u64) -> Result<Self, IoError> {
        if !noise_std.is_finite() || noise_std < 0.0 {
            return Err(IoError::InvalidNoise { std: noise_std });
        }
        let normal =
            Normal::new(0.0, noise_std).map_err(|_| IoError::InvalidNoise { std: noise_std })?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let t = linspace(0.0, 6.0 * PI, len);

        let mut noisy = |f: &dyn Fn(f64) -> f64| -> Vec<f64> {
            t.iter().map(|&x| f(x) + normal.sample(&mut rng)).collect()
        };

        let shapes = vec![
            ("cos", noisy(&f64::cos)),
            ("abs_cos", noisy(&|x: f64| x.cos().abs())),
            ("square", t.iter().map(|&x| sign((x + 1.5).cos())).collect()),
            ("noise", noisy(&|_: f64| 0.0)),
        ];
        let query = TimeSeries::new(noisy(&|x: f64| (x + 2.0).cos()))?;

        let mut ids = Vec::with_capacity(shapes.len());
        let mut series = Vec::with_capacity(shapes.len());
        for (id, values) in shapes {
            ids.push(SequenceId::new(id));
            series.push(TimeSeries::new(values)?);
        }
        debug!(n_candidates = series.len(), len, "synthetic dataset generated");

        Ok(Self {
            candidates: Dataset { ids, series },
            query_id: SequenceId::new("query"),
            query,
        })
    }
}

/// `n` evenly spaced points over `[start, end]`, both ends included.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Sign function with `sign(0) = 0`.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
