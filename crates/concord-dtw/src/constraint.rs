//! Global band constraints for exact DTW.

use std::ops::Range;

use crate::window::SearchWindow;

/// Constraint on how far the warping path may stray from the diagonal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BandConstraint {
    /// Every cell of the cost matrix is admissible.
    #[default]
    Unconstrained,

    /// Sakoe-Chiba band: row `i` admits columns within `radius` of the
    /// diagonal. For series of unequal length the diagonal is rescaled so
    /// that it still joins `(0, 0)` and `(n-1, m-1)`. Distances under a band
    /// are never smaller than the unconstrained distance.
    SakoeChibaRadius(usize),
}

impl BandConstraint {
    /// Admissible column range for `row` of an `n_rows x n_cols` cost matrix.
    #[must_use]
    pub fn column_range(&self, row: usize, n_rows: usize, n_cols: usize) -> Range<usize> {
        match self {
            Self::Unconstrained => 0..n_cols,
            Self::SakoeChibaRadius(r) => {
                let center = if n_rows <= 1 || n_rows == n_cols {
                    row.min(n_cols - 1)
                } else {
                    (row as f64 * (n_cols - 1) as f64 / (n_rows - 1) as f64).round() as usize
                };
                let start = center.saturating_sub(*r);
                let end = (center + r + 1).min(n_cols);
                start..end
            }
        }
    }

    /// Materialize the constraint as a per-row [`SearchWindow`].
    #[must_use]
    pub fn window(&self, n_rows: usize, n_cols: usize) -> SearchWindow {
        match self {
            Self::Unconstrained => SearchWindow::full(n_rows, n_cols),
            Self::SakoeChibaRadius(_) => SearchWindow::from_rows(
                (0..n_rows)
                    .map(|row| self.column_range(row, n_rows, n_cols))
                    .collect(),
                n_cols,
            ),
        }
    }
}
