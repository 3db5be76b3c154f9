//! Time-series agreement engine.
//!
//! Validates a pair of equal-length series, then computes Pearson r,
//! Spearman rho, Kendall tau-b, mean squared error and a DTW distance. The
//! comparison either yields all five values or fails with the first error in a
//! fixed order (validation, Pearson, Spearman, Kendall, MSE, DTW).
//!
//! The engine is stateless; concurrent calls need no coordination.

mod compare;
mod config;
mod error;
mod result;
mod validate;

pub use config::CompareConfig;
pub use error::{CompareError, ErrorKind, Measure, SeriesLabel, Status};
pub use result::ComparisonResult;
pub use validate::{SeriesPair, validate};

/// Compare `a` and `b` with [`CompareConfig::default`].
///
/// # Errors
///
/// See [`CompareConfig::compare`].
pub fn compare(a: &[f64], b: &[f64]) -> Result<ComparisonResult, CompareError> {
    CompareConfig::default().compare(a, b)
}
