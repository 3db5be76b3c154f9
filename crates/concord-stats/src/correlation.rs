//! Pearson and Spearman correlation.

use tracing::instrument;

use crate::coefficient::Coefficient;
use crate::error::{Operand, StatsError};
use crate::rank::fractional_ranks;
use crate::check_paired;

/// Pearson product-moment correlation, `cov(a, b) / (sd(a) * sd(b))`.
///
/// Population and sample normalizations give the same ratio, so neither is
/// applied. Deviations are rescaled before squaring, so any finite input gives
/// a finite coefficient.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`StatsError::LengthMismatch`] | `a.len() != b.len()` |
/// | [`StatsError::Empty`] | Both samples are empty |
/// | [`StatsError::ZeroVariance`] | Either sample is constant |
pub fn pearson(a: &[f64], b: &[f64]) -> Result<Coefficient, StatsError> {
    check_paired(a, b)?;
    if is_constant(a) {
        return Err(StatsError::ZeroVariance { operand: Operand::First });
    }
    if is_constant(b) {
        return Err(StatsError::ZeroVariance { operand: Operand::Second });
    }

    let dx = unit_deviations(a).ok_or(StatsError::ZeroVariance { operand: Operand::First })?;
    let dy = unit_deviations(b).ok_or(StatsError::ZeroVariance { operand: Operand::Second })?;

    let (sab, saa, sbb) = dx
        .iter()
        .zip(&dy)
        .fold((0.0, 0.0, 0.0), |(sab, saa, sbb), (&x, &y)| {
            (sab + x * y, saa + x * x, sbb + y * y)
        });

    Ok(Coefficient::from_ratio(sab / (saa.sqrt() * sbb.sqrt())))
}

/// Spearman rank correlation: Pearson on fractional ranks.
///
/// # Errors
///
/// Same as [`pearson`]; a sample is degenerate when all its values tie.
#[instrument(skip_all, fields(n = a.len()))]
pub fn spearman(a: &[f64], b: &[f64]) -> Result<Coefficient, StatsError> {
    check_paired(a, b)?;
    pearson(&fractional_ranks(a), &fractional_ranks(b))
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

/// Deviations from the mean, scaled so the largest has magnitude 1.
///
/// Values are first divided by their largest magnitude, so the mean and the
/// deviations stay finite for any finite input and squaring them can neither
/// overflow nor underflow to zero. `None` when every deviation is zero.
fn unit_deviations(values: &[f64]) -> Option<Vec<f64>> {
    let scale = max_abs(values.iter().copied());
    if scale == 0.0 {
        return None;
    }
    let n = values.len() as f64;
    let mean: f64 = values.iter().map(|v| v / scale / n).sum();
    let deviations: Vec<f64> = values.iter().map(|v| v / scale - mean).collect();
    let spread = max_abs(deviations.iter().copied());
    if spread == 0.0 {
        return None;
    }
    Some(deviations.into_iter().map(|d| d / spread).collect())
}

fn max_abs(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |m, v| m.max(v.abs()))
}
