//! Kendall rank correlation, tau-b variant.

use std::cmp::Ordering;

use tracing::instrument;

use crate::check_paired;
use crate::coefficient::Coefficient;
use crate::error::StatsError;
use crate::rank::tied_pairs;

/// Kendall's tau-b in `O(n log n)`.
///
/// `tau = (C - D) / sqrt((n0 - n_a) * (n0 - n_b))` where `n0 = n(n-1)/2` and
/// `n_a`, `n_b` count pairs tied in `a` and in `b`.
///
/// Follows Knight's method: sort observations by `(a, b)`, count runs tied in
/// `a` and jointly tied in `(a, b)`, then count the swaps a merge sort needs to
/// order the resulting `b` sequence. Those swaps are exactly the discordant
/// pairs, giving `C - D = n0 - n_a - n_b + n_ab - 2 * swaps`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`StatsError::LengthMismatch`] | `a.len() != b.len()` |
/// | [`StatsError::Empty`] | Both samples are empty |
/// | [`StatsError::ZeroTieDenominator`] | Either sample is constant, or `n < 2` |
#[instrument(skip_all, fields(n = a.len()))]
pub fn kendall_tau_b(a: &[f64], b: &[f64]) -> Result<Coefficient, StatsError> {
    check_paired(a, b)?;
    let n = a.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| cmp_f64(a[i], a[j]).then_with(|| cmp_f64(b[i], b[j])));

    let mut tied_a = 0u64;
    let mut tied_ab = 0u64;
    for run in order.chunk_by(|&i, &j| a[i] == a[j]) {
        let t = run.len() as u64;
        tied_a += t * (t - 1) / 2;
        tied_ab += run
            .chunk_by(|&i, &j| b[i] == b[j])
            .map(|r| {
                let t = r.len() as u64;
                t * (t - 1) / 2
            })
            .sum::<u64>();
    }

    let mut b_sorted: Vec<f64> = order.iter().map(|&i| b[i]).collect();
    let mut scratch = vec![0.0; n];
    let swaps = count_inversions(&mut b_sorted, &mut scratch);
    let tied_b = tied_pairs(&b_sorted);

    let n0 = (n as u64) * (n as u64 - 1) / 2;
    tau_b(n0, tied_a, tied_b, tied_ab, swaps)
}

/// Kendall's tau-b by direct enumeration of all `n(n-1)/2` pairs.
///
/// `O(n^2)`; a reference for [`kendall_tau_b`] and adequate for short inputs.
///
/// # Errors
///
/// Same as [`kendall_tau_b`].
pub fn kendall_tau_b_quadratic(a: &[f64], b: &[f64]) -> Result<Coefficient, StatsError> {
    check_paired(a, b)?;
    let n = a.len();
    let (mut concordant, mut discordant) = (0i64, 0i64);
    let (mut only_a, mut only_b) = (0u64, 0u64);
    let mut both = 0u64;

    for i in 0..n {
        for j in (i + 1)..n {
            let sa = cmp_f64(a[i], a[j]);
            let sb = cmp_f64(b[i], b[j]);
            match (sa, sb) {
                (Ordering::Equal, Ordering::Equal) => both += 1,
                (Ordering::Equal, _) => only_a += 1,
                (_, Ordering::Equal) => only_b += 1,
                _ if sa == sb => concordant += 1,
                _ => discordant += 1,
            }
        }
    }

    let n0 = (n as u64) * (n as u64).saturating_sub(1) / 2;
    let tied_a = only_a + both;
    let tied_b = only_b + both;
    let denominator = ((n0 - tied_a) as f64 * (n0 - tied_b) as f64).sqrt();
    if denominator == 0.0 {
        return Err(StatsError::ZeroTieDenominator);
    }
    Ok(Coefficient::from_ratio((concordant - discordant) as f64 / denominator))
}

fn tau_b(
    n0: u64,
    tied_a: u64,
    tied_b: u64,
    tied_ab: u64,
    swaps: u64,
) -> Result<Coefficient, StatsError> {
    let denominator = ((n0 - tied_a) as f64 * (n0 - tied_b) as f64).sqrt();
    if denominator == 0.0 {
        return Err(StatsError::ZeroTieDenominator);
    }
    let numerator =
        n0 as i128 - tied_a as i128 - tied_b as i128 + tied_ab as i128 - 2 * swaps as i128;
    Ok(Coefficient::from_ratio(numerator as f64 / denominator))
}

/// Inputs are finite, so `partial_cmp` never fails; `-0.0` ties with `0.0`.
fn cmp_f64(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Merge sort `values` in place and return the number of strictly inverted
/// pairs. Equal values are not counted.
fn count_inversions(values: &mut [f64], scratch: &mut [f64]) -> u64 {
    let n = values.len();
    if n < 2 {
        return 0;
    }
    let mid = n / 2;
    let mut swaps = {
        let (left, right) = values.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        count_inversions(left, left_scratch) + count_inversions(right, right_scratch)
    };

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < n {
        if values[i] <= values[j] {
            scratch[k] = values[i];
            i += 1;
        } else {
            scratch[k] = values[j];
            j += 1;
            swaps += (mid - i) as u64;
        }
        k += 1;
    }
    let rest = mid - i;
    scratch[k..k + rest].copy_from_slice(&values[i..mid]);
    k += rest;
    scratch[k..n].copy_from_slice(&values[j..n]);
    values.copy_from_slice(&scratch[..n]);
    swaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-12
    }

    fn pseudo_random(n: usize, modulus: u64, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                ((state >> 33) % modulus) as f64
            })
            .collect()
    }

    #[test]
    fn inversion_count_of_reversed_run() {
        let mut v = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        let mut scratch = vec![0.0; 5];
        assert_eq!(count_inversions(&mut v, &mut scratch), 10);
        assert_eq!(v, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn equal_values_are_not_inversions() {
        let mut v = vec![2.0, 1.0, 2.0, 1.0];
        let mut scratch = vec![0.0; 4];
        assert_eq!(count_inversions(&mut v, &mut scratch), 3);
    }

    #[test]
    fn perfect_agreement_and_reversal() {
        let a = [1.0, 2.0, 3.0, 4.0];
        assert!(close(kendall_tau_b(&a, &a).unwrap().value(), 1.0));
        let r = kendall_tau_b(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap().value();
        assert!(close(r, -1.0));
    }

    #[test]
    fn tie_adjusted_value() {
        // One pair tied in a, two concordant: 2 / sqrt(2 * 3)
        let tau = kendall_tau_b(&[1.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap().value();
        assert!(close(tau, 2.0 / 6.0_f64.sqrt()));
    }

    #[test]
    fn constant_sample_is_degenerate() {
        assert_eq!(
            kendall_tau_b(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::ZeroTieDenominator)
        );
        assert_eq!(kendall_tau_b(&[1.0], &[1.0]), Err(StatsError::ZeroTieDenominator));
    }

    #[test]
    fn fast_matches_quadratic_with_heavy_ties() {
        for (seed, modulus) in [(1u64, 3u64), (2, 7), (3, 50), (4, 1_000_000)] {
            let a = pseudo_random(257, modulus, seed);
            let b = pseudo_random(257, modulus + 2, seed + 100);
            let fast = kendall_tau_b(&a, &b).unwrap().value();
            let slow = kendall_tau_b_quadratic(&a, &b).unwrap().value();
            assert!(close(fast, slow), "seed {seed}: {fast} vs {slow}");
        }
    }

    #[test]
    fn symmetric_in_arguments() {
        let a = pseudo_random(64, 10, 9);
        let b = pseudo_random(64, 4, 10);
        let ab = kendall_tau_b(&a, &b).unwrap().value();
        let ba = kendall_tau_b(&b, &a).unwrap().value();
        assert!(close(ab, ba));
    }
}
