//! Agreement statistics between two paired samples.
//!
//! Every function takes two equal-length slices of finite values and treats
//! `a[i]` and `b[i]` as one observation. Nothing is delegated to an external
//! statistics package: ranks, tie corrections and pair counting are all
//! implemented here.

mod coefficient;
mod correlation;
mod error;
mod kendall;
mod mse;
mod rank;

pub use coefficient::Coefficient;
pub use correlation::{pearson, spearman};
pub use error::{Operand, StatsError};
pub use kendall::{kendall_tau_b, kendall_tau_b_quadratic};
pub use mse::mean_squared_error;
pub use rank::{fractional_ranks, tied_pairs};

/// Reject mismatched or empty samples.
pub(crate) fn check_paired(a: &[f64], b: &[f64]) -> Result<(), StatsError> {
    if a.len() != b.len() {
        return Err(StatsError::LengthMismatch {
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    if a.is_empty() {
        return Err(StatsError::Empty);
    }
    Ok(())
}
