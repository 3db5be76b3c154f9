//! Exact DTW recurrence, optionally restricted to a band or search window.

use tracing::instrument;

use crate::constraint::BandConstraint;
use crate::distance::DtwDistance;
use crate::path::{WarpingPath, WarpingStep};
use crate::series::TimeSeriesView;
use crate::window::SearchWindow;

/// Exact DTW solver. Immutable, `Copy`, and safe to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw {
    constraint: BandConstraint,
}

impl Dtw {
    /// Solver over the full cost matrix.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self {
            constraint: BandConstraint::Unconstrained,
        }
    }

    /// Solver restricted to a Sakoe-Chiba band of the given radius.
    ///
    /// The band is fixed before looking at the data, unlike the window
    /// [`FastDtw`](crate::FastDtw) projects from a coarse path. The result is
    /// the exact optimum among warpings that never stray more than `radius`
    /// steps from the diagonal, at a cost of `O(n * radius)` regardless of
    /// the input. Use it when a hard locality limit on the alignment is
    /// wanted; use `FastDtw` to approximate the unconstrained distance.
    #[must_use]
    pub fn with_sakoe_chiba(radius: usize) -> Self {
        Self {
            constraint: BandConstraint::SakoeChibaRadius(radius),
        }
    }

    /// Band constraint in use.
    #[must_use]
    pub fn constraint(&self) -> BandConstraint {
        self.constraint
    }

    /// DTW distance between `a` and `b`.
    ///
    /// Solves `D[i][j] = |a_i - b_j| + min(D[i-1][j], D[i][j-1], D[i-1][j-1])`
    /// with a rolling two-row buffer: `O(n * bw)` time, `O(bw)` space, where
    /// `bw` is the band width (`m` when unconstrained).
    #[must_use]
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: TimeSeriesView<'_>, b: TimeSeriesView<'_>) -> DtwDistance {
        let window = self.constraint.window(a.len(), b.len());
        DtwDistance::new(windowed_cost(a.as_slice(), b.as_slice(), &window))
    }

    /// DTW distance plus the optimal warping path.
    ///
    /// Keeps the whole banded matrix and a direction byte per cell for the
    /// traceback, so memory is `O(n * bw)`. Prefer [`distance`][Dtw::distance]
    /// when only the scalar is needed.
    #[must_use]
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance_and_path(
        &self,
        a: TimeSeriesView<'_>,
        b: TimeSeriesView<'_>,
    ) -> (DtwDistance, WarpingPath) {
        let window = self.constraint.window(a.len(), b.len());
        let (cost, steps) = windowed_cost_and_path(a.as_slice(), b.as_slice(), &window);
        (DtwDistance::new(cost), WarpingPath::new(steps))
    }
}

/// Rolling-buffer DTW cost restricted to `window`.
///
/// Each buffer has `bw + 2` slots. Slot 0 is a left sentinel and the active
/// columns of a row occupy `1..=bw` relative to that row's start. Reads that
/// fall outside the previous row's range land on `INFINITY` slots.
pub(crate) fn windowed_cost(a: &[f64], b: &[f64], window: &SearchWindow) -> f64 {
    let n = a.len();
    let m = b.len();
    debug_assert_eq!(window.n_rows(), n);
    debug_assert_eq!(window.n_cols(), m);

    let buf_width = window.band_width() + 2;
    let mut prev = vec![f64::INFINITY; buf_width];
    let mut curr = vec![f64::INFINITY; buf_width];
    let mut prev_start = 0usize;

    for (i, &ai) in a.iter().enumerate() {
        curr.fill(f64::INFINITY);
        let cols = window.column_range(i);
        let curr_start = cols.start;

        for j in cols {
            let cost = (ai - b[j]).abs();
            let cj = j - curr_start + 1;

            if i == 0 && j == 0 {
                curr[cj] = cost;
                continue;
            }

            let left = if j > curr_start { curr[cj - 1] } else { f64::INFINITY };
            let (above, diag) = if i > 0 {
                let pj = j.wrapping_sub(prev_start).wrapping_add(1);
                let above = prev.get(pj).copied().unwrap_or(f64::INFINITY);
                let diag = if j > 0 {
                    prev.get(pj.wrapping_sub(1)).copied().unwrap_or(f64::INFINITY)
                } else {
                    f64::INFINITY
                };
                (above, diag)
            } else {
                (f64::INFINITY, f64::INFINITY)
            };

            curr[cj] = cost + left.min(above).min(diag);
        }

        prev_start = curr_start;
        std::mem::swap(&mut prev, &mut curr);
    }

    let last = window.column_range(n - 1);
    if !last.contains(&(m - 1)) {
        return f64::INFINITY;
    }
    prev[m - 1 - last.start + 1]
}

/// Full banded DTW with traceback.
///
/// Cell `(i, j)` lives at `i * bw + (j - row_start(i))`. Direction bytes:
/// 0 = diagonal, 1 = above, 2 = left. Ties prefer the diagonal, then above.
/// Returns an empty path when the window admits no path.
pub(crate) fn windowed_cost_and_path(
    a: &[f64],
    b: &[f64],
    window: &SearchWindow,
) -> (f64, Vec<WarpingStep>) {
    let n = a.len();
    let m = b.len();
    let bw = window.band_width();

    let mut cost = vec![f64::INFINITY; n * bw];
    let mut dirs = vec![0u8; n * bw];

    for i in 0..n {
        let cols = window.column_range(i);
        let prev_cols = if i > 0 { window.column_range(i - 1) } else { 0..0 };

        for j in cols.clone() {
            let local = (a[i] - b[j]).abs();
            let idx = i * bw + (j - cols.start);

            if i == 0 && j == 0 {
                cost[idx] = local;
                continue;
            }

            let diag = if j > 0 && prev_cols.contains(&(j - 1)) {
                cost[(i - 1) * bw + (j - 1 - prev_cols.start)]
            } else {
                f64::INFINITY
            };
            let above = if prev_cols.contains(&j) {
                cost[(i - 1) * bw + (j - prev_cols.start)]
            } else {
                f64::INFINITY
            };
            let left = if j > cols.start { cost[idx - 1] } else { f64::INFINITY };

            let (best, dir) = if diag <= above && diag <= left {
                (diag, 0u8)
            } else if above <= left {
                (above, 1u8)
            } else {
                (left, 2u8)
            };
            cost[idx] = local + best;
            dirs[idx] = dir;
        }
    }

    let last = window.column_range(n - 1);
    if !last.contains(&(m - 1)) {
        return (f64::INFINITY, Vec::new());
    }
    let total = cost[(n - 1) * bw + (m - 1 - last.start)];
    if !total.is_finite() {
        return (total, Vec::new());
    }

    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n - 1, m - 1);
    loop {
        steps.push(WarpingStep { a: i, b: j });
        if i == 0 && j == 0 {
            break;
        }
        let start = window.column_range(i).start;
        match dirs[i * bw + (j - start)] {
            0 => {
                i -= 1;
                j -= 1;
            }
            1 => i -= 1,
            _ => j -= 1,
        }
    }
    steps.reverse();

    (total, steps)
}
