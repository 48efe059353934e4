//! Sakoe-Chiba band geometry.

use std::ops::Range;

use crate::error::DtwError;

/// Sakoe-Chiba band: cell `(i, j)` is eligible only if `|i - j| <= radius`.
///
/// A radius of 0 admits only the identity alignment; any radius of at least
/// `n - 1` admits every cell of an `n x n` cost matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SakoeChibaBand {
    radius: usize,
}

impl SakoeChibaBand {
    /// Create a band with the given radius.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    /// Return the band radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Return true if cell `(i, j)` lies inside the band.
    #[must_use]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i.abs_diff(j) <= self.radius
    }

    /// Return the eligible column range for a given row.
    ///
    /// This is the intersection of `[row - r, row + r]` with `[0, n_cols)`.
    #[must_use]
    pub fn column_range(&self, row: usize, n_cols: usize) -> Range<usize> {
        let start = row.saturating_sub(self.radius);
        let end = row.saturating_add(self.radius).saturating_add(1).min(n_cols);
        start..end
    }

    /// Return the maximum number of eligible cells in any row, `min(2r + 1, n_cols)`.
    #[must_use]
    pub fn band_width(&self, n_cols: usize) -> usize {
        self.radius
            .saturating_mul(2)
            .saturating_add(1)
            .min(n_cols)
    }
}

impl From<usize> for SakoeChibaBand {
    fn from(radius: usize) -> Self {
        Self::new(radius)
    }
}

impl TryFrom<i64> for SakoeChibaBand {
    type Error = DtwError;

    /// Build a band from a signed radius, rejecting negative values rather than clamping.
    fn try_from(radius: i64) -> Result<Self, Self::Error> {
        usize::try_from(radius)
            .map(Self::new)
            .map_err(|_| DtwError::NegativeRadius { radius })
    }
}
