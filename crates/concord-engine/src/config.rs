//! Configuration builder for comparisons.

use concord_dtw::FastDtw;

use crate::compare::run;
use crate::error::CompareError;
use crate::result::ComparisonResult;
use crate::validate::validate;

/// Configuration for comparing two series.
///
/// Construct via [`CompareConfig::new`] (or `Default`), then chain `with_*`
/// methods to override defaults.
///
/// # Defaults
///
/// | Parameter         | Default |
/// |-------------------|---------|
/// | `radius`          | 1       |
/// | `exact_threshold` | 100     |
/// | `parallel`        | true    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareConfig {
    pub(crate) radius: usize,
    pub(crate) exact_threshold: usize,
    pub(crate) parallel: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareConfig {
    /// Configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            radius: 1,
            exact_threshold: 100,
            parallel: true,
        }
    }

    /// Set the refinement radius of the coarsen-and-refine DTW. Larger values
    /// trade speed for accuracy.
    #[must_use]
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Set the length at or below which DTW is solved exactly.
    #[must_use]
    pub fn with_exact_threshold(mut self, exact_threshold: usize) -> Self {
        self.exact_threshold = exact_threshold;
        self
    }

    /// Run the correlation, MSE and DTW groups on the rayon pool
    /// (`true`) or one after another on the calling thread (`false`).
    /// The outcome is the same either way.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Refinement radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Length at or below which DTW is solved exactly.
    #[must_use]
    pub fn exact_threshold(&self) -> usize {
        self.exact_threshold
    }

    /// Whether measure groups run in parallel.
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// DTW solver implied by this configuration.
    #[must_use]
    pub fn fast_dtw(&self) -> FastDtw {
        FastDtw::new(self.radius).with_exact_threshold(self.exact_threshold)
    }

    /// Validate `a` and `b`, then compute all five measures.
    ///
    /// # Errors
    ///
    /// The first failure in this order:
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`CompareError::EmptySeries`] | Either series is empty |
    /// | [`CompareError::LengthMismatch`] | Lengths differ |
    /// | [`CompareError::NonNumericValue`] | A value is NaN or infinite |
    /// | [`CompareError::DegenerateSeries`] | Pearson, Spearman or Kendall undefined |
    /// | [`CompareError::NonFiniteResult`] | A measure overflowed |
    pub fn compare(&self, a: &[f64], b: &[f64]) -> Result<ComparisonResult, CompareError> {
        let pair = validate(a, b)?;
        run(self, pair)
    }
}
