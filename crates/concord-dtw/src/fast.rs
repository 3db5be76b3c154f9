//! Coarsen-and-refine DTW approximation.

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::distance::DtwDistance;
use crate::dtw::{windowed_cost, windowed_cost_and_path};
use crate::path::WarpingPath;
use crate::series::TimeSeriesView;
use crate::window::SearchWindow;

/// Multi-resolution DTW.
///
/// Both series are halved by pairwise averaging until one of them is shorter
/// than `radius + 2`. The coarsest level is solved exactly; its warping path is
/// projected one level up and widened by `radius`, and the exact recurrence is
/// re-solved inside that window. This repeats up to full resolution.
///
/// A level whose longer series has at most `exact_threshold` points is solved
/// over the full matrix instead, so short inputs always get the exact answer.
///
/// # Defaults
///
/// | Parameter | Default |
/// |---|---|
/// | `radius` | 1 |
/// | `exact_threshold` | 100 |
///
/// The result is never below the exact distance. It is symmetric in its
/// arguments: the operands are put into a canonical order before coarsening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastDtw {
    radius: usize,
    exact_threshold: usize,
}

impl Default for FastDtw {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FastDtw {
    /// Approximation with the given refinement radius.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self {
            radius,
            exact_threshold: 100,
        }
    }

    /// Set the length at or below which a level is solved exactly.
    #[must_use]
    pub fn with_exact_threshold(mut self, exact_threshold: usize) -> Self {
        self.exact_threshold = exact_threshold;
        self
    }

    /// Refinement radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Length at or below which a level is solved exactly.
    #[must_use]
    pub fn exact_threshold(&self) -> usize {
        self.exact_threshold
    }

    /// Approximate DTW distance between `a` and `b`.
    #[must_use]
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: TimeSeriesView<'_>, b: TimeSeriesView<'_>) -> DtwDistance {
        let (a, b, _) = canonical_order(a.as_slice(), b.as_slice());
        let window = self.window_for(a, b);
        debug!(cells = window.cell_count(), "refined search window");
        DtwDistance::new(windowed_cost(a, b, &window))
    }

    /// Approximate DTW distance and the warping path it was measured along.
    #[must_use]
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance_and_path(
        &self,
        a: TimeSeriesView<'_>,
        b: TimeSeriesView<'_>,
    ) -> (DtwDistance, WarpingPath) {
        let (a, b, swapped) = canonical_order(a.as_slice(), b.as_slice());
        let (cost, path) = self.solve(a, b);
        let path = if swapped { path.transposed() } else { path };
        (DtwDistance::new(cost), path)
    }

    fn solve(&self, a: &[f64], b: &[f64]) -> (f64, WarpingPath) {
        let window = self.window_for(a, b);
        let (cost, steps) = windowed_cost_and_path(a, b, &window);
        (cost, WarpingPath::new(steps))
    }

    /// Search window for the full-resolution problem on `a` x `b`.
    fn window_for(&self, a: &[f64], b: &[f64]) -> SearchWindow {
        let (n, m) = (a.len(), b.len());
        if n.min(m) < self.radius + 2 || n.max(m) <= self.exact_threshold {
            return SearchWindow::full(n, m);
        }
        let coarse_a = halve(a);
        let coarse_b = halve(b);
        let (_, coarse_path) = self.solve(&coarse_a, &coarse_b);
        SearchWindow::project(&coarse_path, self.radius, n, m)
    }
}

/// Average adjacent pairs; an odd trailing value is dropped.
fn halve(values: &[f64]) -> Vec<f64> {
    values
        .chunks_exact(2)
        .map(|pair| (pair[0] + pair[1]) / 2.0)
        .collect()
}

/// Order the operands lexicographically so `f(a, b)` and `f(b, a)` solve the
/// same problem. The flag is true when they were swapped.
fn canonical_order<'a>(a: &'a [f64], b: &'a [f64]) -> (&'a [f64], &'a [f64], bool) {
    let ord = a
        .iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()));
    if ord == Ordering::Greater {
        (b, a, true)
    } else {
        (a, b, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtw::Dtw;
    use crate::series::TimeSeries;

    fn ts(values: Vec<f64>) -> TimeSeries {
        TimeSeries::new(values).unwrap()
    }

    fn sine(n: usize, phase: f64) -> TimeSeries {
        ts((0..n).map(|i| (i as f64 * 0.07 + phase).sin()).collect())
    }

    #[test]
    fn halve_drops_odd_tail() {
        assert_eq!(halve(&[1.0, 3.0, 5.0, 7.0, 9.0]), vec![2.0, 6.0]);
        assert!(halve(&[4.0]).is_empty());
    }

    #[test]
    fn canonical_order_is_stable() {
        let (x, y, swapped) = canonical_order(&[2.0, 0.0], &[1.0, 5.0]);
        assert_eq!((x, y, swapped), (&[1.0, 5.0][..], &[2.0, 0.0][..], true));
        let (_, _, swapped) = canonical_order(&[1.0, 2.0], &[1.0, 2.0]);
        assert!(!swapped);
    }

    #[test]
    fn short_series_are_exact() {
        let a = ts(vec![1.0, 3.0, 2.0, 4.0, 0.0, 2.0]);
        let b = ts(vec![2.0, 4.0, 1.0, 3.0, 3.0, 1.0]);
        let exact = Dtw::unconstrained().distance(a.as_view(), b.as_view());
        let fast = FastDtw::new(1).distance(a.as_view(), b.as_view());
        assert_eq!(exact.value(), fast.value());
    }

    #[test]
    fn approximation_never_beats_exact() {
        let a = sine(240, 0.0);
        let b = sine(240, 0.6);
        let exact = Dtw::unconstrained().distance(a.as_view(), b.as_view()).value();
        for radius in [0, 1, 2, 5] {
            let fast = FastDtw::new(radius)
                .with_exact_threshold(0)
                .distance(a.as_view(), b.as_view())
                .value();
            assert!(fast.is_finite(), "radius {radius} produced {fast}");
            assert!(fast >= exact - 1e-9, "radius {radius}: {fast} < {exact}");
        }
    }

    #[test]
    fn identical_long_series_are_zero() {
        let a = sine(513, 0.3);
        let d = FastDtw::new(1).with_exact_threshold(0).distance(a.as_view(), a.as_view());
        assert_eq!(d.value(), 0.0);
    }

    #[test]
    fn symmetric_in_arguments() {
        let a = sine(301, 0.0);
        let b = ts((0..301).map(|i| ((i * 7) % 13) as f64 * 0.1).collect());
        let fast = FastDtw::new(1).with_exact_threshold(0);
        let ab = fast.distance(a.as_view(), b.as_view()).value();
        let ba = fast.distance(b.as_view(), a.as_view()).value();
        assert_eq!(ab, ba);
    }

    #[test]
    fn path_cost_matches_distance() {
        let a = sine(200, 0.0);
        let b = sine(180, 0.4);
        let fast = FastDtw::new(2).with_exact_threshold(16);
        let (d, path) = fast.distance_and_path(a.as_view(), b.as_view());
        assert!((path.cost(a.as_ref(), b.as_ref()) - d.value()).abs() < 1e-9);
        assert_eq!(path.steps().last().map(|s| (s.a, s.b)), Some((199, 179)));
        let only = fast.distance(a.as_view(), b.as_view());
        assert!((only.value() - d.value()).abs() < 1e-9);
    }

    #[test]
    fn swapped_path_is_transposed_back() {
        let a = ts((0..64).map(|i| 10.0 - i as f64 * 0.1).collect());
        let b = ts((0..40).map(|i| i as f64 * 0.2).collect());
        let fast = FastDtw::new(1).with_exact_threshold(0);
        let (_, path) = fast.distance_and_path(a.as_view(), b.as_view());
        let last = path.steps().last().copied();
        assert_eq!(last.map(|s| (s.a, s.b)), Some((63, 39)));
    }
}
