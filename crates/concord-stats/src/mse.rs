//! Mean squared error.

use crate::check_paired;
use crate::error::StatsError;

/// `(1/n) * sum (a_i - b_i)^2`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`StatsError::LengthMismatch`] | `a.len() != b.len()` |
/// | [`StatsError::Empty`] | Both samples are empty |
pub fn mean_squared_error(a: &[f64], b: &[f64]) -> Result<f64, StatsError> {
    check_paired(a, b)?;
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    Ok(sum / a.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_ramp() {
        let mse = mean_squared_error(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((mse - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn identical_is_zero() {
        let a = [0.5, -3.0, 12.25];
        assert_eq!(mean_squared_error(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn constant_offset_is_not_shift_invariant() {
        let a = [1.0, 2.0, 3.0];
        let b: Vec<f64> = a.iter().map(|x| x + 2.0).collect();
        assert_eq!(mean_squared_error(&a, &b).unwrap(), 4.0);
    }

    #[test]
    fn rejects_mismatch() {
        assert_eq!(
            mean_squared_error(&[1.0], &[1.0, 2.0]),
            Err(StatsError::LengthMismatch { len_a: 1, len_b: 2 })
        );
    }
}
