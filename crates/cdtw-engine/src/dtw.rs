//! Sakoe-Chiba constrained DTW distance computation.

use tracing::instrument;

use crate::band::SakoeChibaBand;
use crate::distance::DtwDistance;
use crate::error::DtwError;
use crate::series::TimeSeriesView;

/// Immutable constrained DTW calculator. Thread-safe and copyable.
///
/// The local cost is the absolute difference `|a[i] - b[j]|`, and the result is
/// the accumulated cost along the cheapest monotonic path from `(0, 0)` to
/// `(n-1, n-1)` that never leaves the band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw {
    band: SakoeChibaBand,
}

impl Dtw {
    /// Create a DTW calculator with a Sakoe-Chiba band of the given radius.
    #[must_use]
    pub fn with_sakoe_chiba(radius: usize) -> Self {
        Self::from_band(SakoeChibaBand::new(radius))
    }

    /// Create a DTW calculator from an existing [`SakoeChibaBand`].
    #[must_use]
    pub fn from_band(band: SakoeChibaBand) -> Self {
        Self { band }
    }

    /// Return the band configuration.
    #[must_use]
    pub fn band(&self) -> SakoeChibaBand {
        self.band
    }

    /// Compute the constrained DTW distance between two equal-length sequences.
    ///
    /// Radius 0 reduces to the pointwise L1 distance and is computed directly.
    /// Otherwise a rolling two-row band buffer is used: O(n * bw) time and
    /// O(bw) space, where `bw = min(2r + 1, n)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::LengthMismatch`] | `a` and `b` differ in length |
    #[instrument(level = "debug", skip(a, b), fields(n = a.len()))]
    pub fn distance(
        &self,
        a: TimeSeriesView<'_>,
        b: TimeSeriesView<'_>,
    ) -> Result<DtwDistance, DtwError> {
        a.ensure_same_len(&b)?;
        let dist = if self.band.radius() == 0 {
            l1(a.as_slice(), b.as_slice())
        } else {
            self.banded_rolling(a.as_slice(), b.as_slice())
        };
        Ok(DtwDistance::new(dist))
    }

    /// Rolling two-row buffer over the band.
    ///
    /// Each row buffer has `bw + 2` slots. Index 0 is the left sentinel and
    /// slots past the active columns stay at INF after the per-row reset, so
    /// out-of-band predecessors read INF without extra branching.
    ///
    /// For column `j` in row `i`, with `start` the first eligible column of
    /// the row and `prev_start` that of row `i - 1`:
    /// - current slot: `j - start + 1`
    /// - above `D[i-1][j]`: `j - prev_start + 1` in `prev`
    /// - diagonal `D[i-1][j-1]`: `j - prev_start` in `prev`
    /// - left `D[i][j-1]`: current slot minus one
    ///
    /// `prev_start <= start <= j` holds on every row, so none of the offsets underflow.
    fn banded_rolling(&self, a: &[f64], b: &[f64]) -> f64 {
        let n = a.len();
        let bw = self.band.band_width(n);
        let buf_width = bw + 2;

        let mut prev = vec![f64::INFINITY; buf_width];
        let mut curr = vec![f64::INFINITY; buf_width];
        let mut prev_start = 0;

        for (i, &x) in a.iter().enumerate() {
            curr.fill(f64::INFINITY);
            let cols = self.band.column_range(i, n);
            let start = cols.start;

            for j in cols {
                let cost = (x - b[j]).abs();
                let cj = j - start + 1;

                if i == 0 {
                    // Row 0 can only be reached from (0, 0) moving right.
                    curr[cj] = if j == 0 { cost } else { cost + curr[cj - 1] };
                    continue;
                }

                let left = curr[cj - 1];
                let above = prev[j - prev_start + 1];
                let diag = prev[j - prev_start];
                curr[cj] = cost + left.min(above).min(diag);
            }

            prev_start = start;
            std::mem::swap(&mut prev, &mut curr);
        }

        // After the final swap `prev` holds row n-1.
        prev[(n - 1) - prev_start + 1]
    }
}

/// Pointwise L1 distance `sum |a[i] - b[i]|`, the radius-0 special case.
fn l1(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Compute the pointwise L1 distance between two equal-length sequences.
///
/// Equal to the constrained DTW distance with radius 0.
///
/// # Errors
///
/// Returns [`DtwError::LengthMismatch`] when the lengths differ.
pub fn l1_distance(a: TimeSeriesView<'_>, b: TimeSeriesView<'_>) -> Result<DtwDistance, DtwError> {
    a.ensure_same_len(&b)?;
    Ok(DtwDistance::new(l1(a.as_slice(), b.as_slice())))
}

/// Validate two raw slices and compute their constrained DTW distance.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::EmptySeries`] | Either slice is empty |
/// | [`DtwError::NonFiniteValue`] | Either slice holds NaN or infinity |
/// | [`DtwError::LengthMismatch`] | Slices differ in length |
pub fn distance(a: &[f64], b: &[f64], radius: usize) -> Result<DtwDistance, DtwError> {
    let a = TimeSeriesView::new(a)?;
    let b = TimeSeriesView::new(b)?;
    Dtw::with_sakoe_chiba(radius).distance(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TimeSeries;

    /// Dense n x n reference: every cell materialized, out-of-band cells left at INF.
    fn dense_reference(a: &[f64], b: &[f64], radius: usize) -> f64 {
        let n = a.len();
        let band = SakoeChibaBand::new(radius);
        let mut d = vec![vec![f64::INFINITY; n]; n];
        for i in 0..n {
            for j in 0..n {
                if !band.contains(i, j) {
                    continue;
                }
                let cost = (a[i] - b[j]).abs();
                if i == 0 && j == 0 {
                    d[i][j] = cost;
                    continue;
                }
                let above = if i > 0 { d[i - 1][j] } else { f64::INFINITY };
                let left = if j > 0 { d[i][j - 1] } else { f64::INFINITY };
                let diag = if i > 0 && j > 0 { d[i - 1][j - 1] } else { f64::INFINITY };
                d[i][j] = cost + above.min(left).min(diag);
            }
        }
        d[n - 1][n - 1]
    }

    fn ts(values: &[f64]) -> TimeSeries {
        TimeSeries::new(values.to_vec()).unwrap()
    }

    const A: [f64; 9] = [1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    const B: [f64; 9] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 6.0, 6.0, 7.0];

    #[test]
    fn reference_pair_per_radius() {
        let a = ts(&A);
        let b = ts(&B);
        for (r, expected) in [(0, 8.0), (1, 4.0), (2, 0.0)] {
            let d = Dtw::with_sakoe_chiba(r).distance(a.as_view(), b.as_view()).unwrap();
            assert!((d.value() - expected).abs() < 1e-12, "r={r}: got {d}");
        }
    }

    #[test]
    fn single_element_ignores_radius() {
        for r in [0, 1, 5, usize::MAX] {
            assert_eq!(distance(&[5.0], &[9.0], r).unwrap().value(), 4.0);
        }
    }

    #[test]
    fn identical_series_distance_zero() {
        let s = ts(&[1.0, -3.0, 2.5, 0.0]);
        for r in 0..5 {
            let d = Dtw::with_sakoe_chiba(r).distance(s.as_view(), s.as_view()).unwrap();
            assert_eq!(d, DtwDistance::ZERO);
        }
    }

    #[test]
    fn hand_computed_2x2() {
        // a=[0,1], b=[1,0], r=1
        // D[0][0] = 1, D[0][1] = 0 + 1 = 1, D[1][0] = 0 + 1 = 1
        // D[1][1] = 1 + min(1, 1, 1) = 2
        assert_eq!(distance(&[0.0, 1.0], &[1.0, 0.0], 1).unwrap().value(), 2.0);
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = distance(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 2.0, 3.0, 4.0], 2).unwrap_err();
        assert_eq!(err, DtwError::LengthMismatch { left: 5, right: 4 });
    }

    #[test]
    fn length_mismatch_rejected_at_radius_zero() {
        let a = ts(&[1.0, 2.0]);
        let b = ts(&[1.0]);
        let err = Dtw::with_sakoe_chiba(0).distance(a.as_view(), b.as_view()).unwrap_err();
        assert_eq!(err, DtwError::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn raw_slices_validated() {
        assert_eq!(distance(&[], &[], 1), Err(DtwError::EmptySeries));
        assert_eq!(
            distance(&[1.0, f64::NAN], &[1.0, 2.0], 1),
            Err(DtwError::NonFiniteValue { index: 1 })
        );
    }

    #[test]
    fn rolling_matches_dense_reference() {
        let pairs: [(&[f64], &[f64]); 5] = [
            (&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]),
            (&[0.0, 5.0, 0.0, 5.0], &[5.0, 0.0, 5.0, 0.0]),
            (&[0.0, 1.0, 4.0, 9.0, 16.0, 25.0], &[0.0, 2.0, 3.0, 8.0, 15.0, 26.0]),
            (&[10.0, 5.0, 1.0, 0.0, -2.0], &[1.0, 5.0, 10.0, -3.0, 0.5]),
            (&A, &B),
        ];
        for (a, b) in pairs {
            for r in 0..=a.len() {
                let got = distance(a, b, r).unwrap().value();
                let expected = dense_reference(a, b, r);
                assert!(
                    (got - expected).abs() < 1e-9,
                    "{a:?} vs {b:?} r={r}: rolling {got} != dense {expected}"
                );
            }
        }
    }

    #[test]
    fn radius_zero_equals_l1() {
        let a = ts(&A);
        let b = ts(&B);
        let via_dtw = Dtw::with_sakoe_chiba(0).distance(a.as_view(), b.as_view()).unwrap();
        let via_l1 = l1_distance(a.as_view(), b.as_view()).unwrap();
        assert_eq!(via_dtw, via_l1);
        assert_eq!(via_l1.value(), 8.0);
    }

    #[test]
    fn radius_beyond_length_equals_full_band() {
        let full = distance(&A, &B, A.len() - 1).unwrap();
        for r in [A.len(), 2 * A.len(), usize::MAX] {
            assert_eq!(distance(&A, &B, r).unwrap(), full);
        }
    }
}
