//! Warping path types.

/// One aligned pair: index `a` of the first series matched to index `b` of
/// the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpingStep {
    /// Index in the first series.
    pub a: usize,
    /// Index in the second series.
    pub b: usize,
}

/// Monotone, continuous sequence of steps from `(0, 0)` to `(n-1, m-1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    /// Steps in order from the start of both series.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Swap the roles of the two series.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self(self.0.iter().map(|s| WarpingStep { a: s.b, b: s.a }).collect())
    }

    /// Sum of `|a[step.a] - b[step.b]|` along the path.
    #[must_use]
    pub fn cost(&self, a: &[f64], b: &[f64]) -> f64 {
        self.0.iter().map(|s| (a[s.a] - b[s.b]).abs()).sum()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
