//! Search windows: per-row column ranges that restrict the DTW recurrence.

use std::ops::Range;

use crate::path::WarpingPath;

/// Set of admissible cost-matrix cells, stored as one contiguous column range
/// per row.
///
/// Every window built by this crate contains `(0, 0)` and `(n-1, m-1)` and is
/// connected: each row starts no later than one column past the end of the
/// previous row, so at least one monotone warping path fits inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWindow {
    rows: Vec<Range<usize>>,
    n_cols: usize,
}

impl SearchWindow {
    /// Window covering the whole `n_rows x n_cols` matrix.
    #[must_use]
    pub fn full(n_rows: usize, n_cols: usize) -> Self {
        Self {
            rows: vec![0..n_cols; n_rows],
            n_cols,
        }
    }

    /// Build from explicit row ranges, repairing them into a connected window.
    pub(crate) fn from_rows(rows: Vec<Range<usize>>, n_cols: usize) -> Self {
        let (mut lo, mut hi): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .map(|r| (r.start, r.end.saturating_sub(1).max(r.start)))
            .unzip();
        connect(&mut lo, &mut hi, n_cols);
        Self::from_bounds(&lo, &hi, n_cols)
    }

    /// Project a warping path found on the half-resolution problem onto an
    /// `n_rows x n_cols` matrix.
    ///
    /// Each coarse step `(i, j)` is widened by `radius` cells in both
    /// directions and every widened cell maps to the four fine cells
    /// `(2i..=2i+1, 2j..=2j+1)`. Rows left uncovered by an odd trailing
    /// element inherit the range of the row above.
    #[must_use]
    pub fn project(coarse: &WarpingPath, radius: usize, n_rows: usize, n_cols: usize) -> Self {
        let mut lo = vec![usize::MAX; n_rows];
        let mut hi = vec![0usize; n_rows];
        let last_col = n_cols - 1;

        for step in coarse {
            let col_lo = 2 * step.b.saturating_sub(radius);
            let col_hi = (2 * (step.b + radius) + 1).min(last_col);
            let row_lo = 2 * step.a.saturating_sub(radius);
            let row_hi = (2 * (step.a + radius) + 1).min(n_rows - 1);
            if row_lo >= n_rows || col_lo > last_col {
                continue;
            }
            for row in row_lo..=row_hi {
                lo[row] = lo[row].min(col_lo);
                hi[row] = hi[row].max(col_hi);
            }
        }

        for row in 0..n_rows {
            if lo[row] == usize::MAX {
                (lo[row], hi[row]) = if row > 0 { (lo[row - 1], hi[row - 1]) } else { (0, 0) };
            }
        }

        connect(&mut lo, &mut hi, n_cols);
        Self::from_bounds(&lo, &hi, n_cols)
    }

    fn from_bounds(lo: &[usize], hi: &[usize], n_cols: usize) -> Self {
        Self {
            rows: lo.iter().zip(hi).map(|(&l, &h)| l..h + 1).collect(),
            n_cols,
        }
    }

    /// Admissible columns of `row`.
    #[must_use]
    pub fn column_range(&self, row: usize) -> Range<usize> {
        self.rows[row].clone()
    }

    /// Number of rows (length of the first series).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (length of the second series).
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Widest row; the stride used by banded cost matrices.
    #[must_use]
    pub fn band_width(&self) -> usize {
        self.rows.iter().map(ExactSizeIterator::len).max().unwrap_or(0)
    }

    /// Total number of admissible cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(ExactSizeIterator::len).sum()
    }

    /// Return true if `(row, col)` is admissible.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.contains(&col))
    }
}

/// Force inclusive bounds into a connected window from `(0, 0)` to
/// `(n-1, m-1)`: monotone starts and ends, and no row starting more than one
/// column past the previous row's end.
fn connect(lo: &mut [usize], hi: &mut [usize], n_cols: usize) {
    let n = lo.len();
    if n == 0 {
        return;
    }
    let last_col = n_cols - 1;
    for h in hi.iter_mut() {
        *h = (*h).min(last_col);
    }
    lo[0] = 0;
    hi[n - 1] = last_col;
    for i in 1..n {
        hi[i] = hi[i].max(hi[i - 1]);
    }
    for i in (0..n - 1).rev() {
        lo[i] = lo[i].min(lo[i + 1]);
    }
    for i in 1..n {
        lo[i] = lo[i].min(hi[i - 1] + 1).min(hi[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::WarpingStep;

    fn diagonal(len: usize) -> WarpingPath {
        WarpingPath::new((0..len).map(|k| WarpingStep { a: k, b: k }).collect())
    }

    #[test]
    fn full_window_covers_matrix() {
        let w = SearchWindow::full(3, 5);
        assert_eq!(w.cell_count(), 15);
        assert_eq!(w.band_width(), 5);
        assert!(w.contains(2, 4));
        assert!(!w.contains(3, 0));
    }

    #[test]
    fn diagonal_projection_with_zero_radius_is_block_diagonal() {
        let w = SearchWindow::project(&diagonal(3), 0, 6, 6);
        assert_eq!(w.column_range(0), 0..2);
        assert_eq!(w.column_range(1), 0..2);
        assert_eq!(w.column_range(2), 2..4);
        assert_eq!(w.column_range(5), 4..6);
    }

    #[test]
    fn radius_widens_projection() {
        let w = SearchWindow::project(&diagonal(4), 1, 8, 8);
        // Coarse (1, 1) widened by one reaches coarse (0, 2), i.e. fine
        // columns 4..=5 on fine row 0.
        assert_eq!(w.column_range(0), 0..6);
        assert_eq!(w.column_range(3), 0..8);
        assert_eq!(w.column_range(6), 2..8);
    }

    #[test]
    fn odd_tail_row_is_covered() {
        // Coarse problem of length 2 came from fine length 5; row 4 has no
        // coarse parent.
        let w = SearchWindow::project(&diagonal(2), 0, 5, 5);
        assert!(w.contains(4, 4));
        assert!(w.contains(0, 0));
        for row in 1..5 {
            let prev = w.column_range(row - 1);
            let cur = w.column_range(row);
            assert!(cur.start <= prev.end, "row {row} is disconnected");
        }
    }

    #[test]
    fn disconnected_rows_are_bridged() {
        let w = SearchWindow::from_rows(vec![0..1, 3..4, 5..6], 6);
        assert_eq!(w.column_range(1), 1..4);
        assert_eq!(w.column_range(2), 4..6);
    }
}
