//! Accuracy regression tests for concord-stats.
//!
//! Reference coefficients were derived by hand (tie counts and rank vectors are
//! spelled out next to each case) so they do not depend on any other package.

use concord_stats::{
    Operand, StatsError, fractional_ranks, kendall_tau_b, mean_squared_error, pearson, spearman,
};

fn close(x: f64, y: f64) -> bool {
    (x - y).abs() < 1e-12
}

#[test]
fn identical_series_agree_perfectly() {
    let a = [2.0, 7.5, -1.0, 3.25, 0.0, 9.0];
    assert!(close(pearson(&a, &a).unwrap().value(), 1.0));
    assert!(close(spearman(&a, &a).unwrap().value(), 1.0));
    assert!(close(kendall_tau_b(&a, &a).unwrap().value(), 1.0));
    assert_eq!(mean_squared_error(&a, &a).unwrap(), 0.0);
}

#[test]
fn identical_series_with_ties_still_agree_perfectly() {
    let a = [1.0, 1.0, 2.0, 3.0, 3.0, 3.0];
    assert!(close(spearman(&a, &a).unwrap().value(), 1.0));
    assert!(close(kendall_tau_b(&a, &a).unwrap().value(), 1.0));
}

#[test]
fn reversed_series_disagree_perfectly() {
    let a = [1.0, 2.0, 3.0];
    let b = [3.0, 2.0, 1.0];
    assert!(close(pearson(&a, &b).unwrap().value(), -1.0));
    assert!(close(spearman(&a, &b).unwrap().value(), -1.0));
    assert!(close(kendall_tau_b(&a, &b).unwrap().value(), -1.0));
    assert!(close(mean_squared_error(&a, &b).unwrap(), 8.0 / 3.0));
}

#[test]
fn interleaved_pattern() {
    // a = [1, 3, 2, 4], b = [2, 4, 1, 3]
    // pairs (i<j): (0,1) C, (0,2) D, (0,3) C, (1,2) C, (1,3) D, (2,3) C -> C=4, D=2
    let a = [1.0, 3.0, 2.0, 4.0];
    let b = [2.0, 4.0, 1.0, 3.0];
    assert!(close(kendall_tau_b(&a, &b).unwrap().value(), 2.0 / 6.0));
    // ranks a = [1, 3, 2, 4], b = [2, 4, 1, 3]; sum d^2 = 1+1+1+1 = 4
    // rho = 1 - 6 * 4 / (4 * 15) = 0.6
    assert!(close(spearman(&a, &b).unwrap().value(), 0.6));
    // dx = [-1.5, 0.5, -0.5, 1.5], dy = [-0.5, 1.5, -1.5, 0.5]; sab = 3, saa = sbb = 5
    assert!(close(pearson(&a, &b).unwrap().value(), 0.6));
    assert!(close(mean_squared_error(&a, &b).unwrap(), 1.0));
}

#[test]
fn tau_b_with_ties_in_both_samples() {
    // a = [1, 1, 2, 3], b = [1, 2, 2, 3]
    // pairs: (0,1) tie a; (0,2) C; (0,3) C; (1,2) tie b; (1,3) C; (2,3) C
    // n0 = 6, n_a = 1, n_b = 1 -> tau = 4 / sqrt(5 * 5)
    let tau = kendall_tau_b(&[1.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 2.0, 3.0]).unwrap().value();
    assert!(close(tau, 0.8));
}

#[test]
fn symmetric_measures() {
    let a = [0.4, 2.2, 1.9, -0.7, 3.3, 3.3, 1.0];
    let b = [1.1, 0.0, 2.5, -1.2, 2.9, 4.0, 1.0];
    assert!(close(pearson(&a, &b).unwrap().value(), pearson(&b, &a).unwrap().value()));
    assert!(close(spearman(&a, &b).unwrap().value(), spearman(&b, &a).unwrap().value()));
    assert_eq!(mean_squared_error(&a, &b).unwrap(), mean_squared_error(&b, &a).unwrap());
}

#[test]
fn affine_transform_changes_mse_but_not_correlation() {
    let a = [0.4, 2.2, 1.9, -0.7, 3.3];
    let b = [1.1, 0.0, 2.5, -1.2, 2.9];
    let scaled: Vec<f64> = b.iter().map(|y| 3.0 * y + 10.0).collect();
    assert!(close(pearson(&a, &b).unwrap().value(), pearson(&a, &scaled).unwrap().value()));
    assert!(close(spearman(&a, &b).unwrap().value(), spearman(&a, &scaled).unwrap().value()));
    assert!(mean_squared_error(&a, &scaled).unwrap() > mean_squared_error(&a, &b).unwrap());
}

#[test]
fn degenerate_inputs() {
    let flat = [5.0, 5.0, 5.0];
    let ramp = [1.0, 2.0, 3.0];
    assert_eq!(
        pearson(&flat, &ramp),
        Err(StatsError::ZeroVariance { operand: Operand::First })
    );
    assert_eq!(
        spearman(&ramp, &flat),
        Err(StatsError::ZeroVariance { operand: Operand::Second })
    );
    assert_eq!(kendall_tau_b(&flat, &ramp), Err(StatsError::ZeroTieDenominator));
    assert!(close(mean_squared_error(&flat, &ramp).unwrap(), (16.0 + 9.0 + 4.0) / 3.0));
}

#[test]
fn ranks_follow_fractional_convention() {
    assert_eq!(
        fractional_ranks(&[10.0, 30.0, 20.0, 20.0, 40.0]),
        vec![1.0, 4.0, 2.5, 2.5, 5.0]
    );
}

#[test]
fn identity_holds_at_extreme_magnitudes() {
    // Squared deviations here lie outside f64 range unless rescaled first.
    for a in [[1e160, -1e160, 2e160], [1e-170, 2e-170, 3e-170]] {
        assert!(close(pearson(&a, &a).unwrap().value(), 1.0), "{a:?}");
        assert!(close(spearman(&a, &a).unwrap().value(), 1.0), "{a:?}");
        assert!(close(kendall_tau_b(&a, &a).unwrap().value(), 1.0), "{a:?}");
        assert_eq!(mean_squared_error(&a, &a).unwrap(), 0.0);
    }
}

#[test]
fn pearson_is_scale_free_across_magnitudes() {
    let a = [0.3, 1.7, -2.0, 4.4, 0.0, 3.1];
    let b = [1.0, 2.5, -1.0, 3.0, 0.2, 2.2];
    let reference = pearson(&a, &b).unwrap().value();
    for scale in [1e-300, 1e-170, 1e160, 1e300] {
        let sa: Vec<f64> = a.iter().map(|x| x * scale).collect();
        let sb: Vec<f64> = b.iter().map(|y| y * scale).collect();
        let r = pearson(&sa, &sb).unwrap().value();
        assert!((r - reference).abs() < 1e-9, "scale {scale}: {r} vs {reference}");
    }
}

#[test]
fn pearson_spans_the_whole_float_range() {
    let r = pearson(&[f64::MAX, -f64::MAX, 0.0], &[1.0, -1.0, 0.0]).unwrap().value();
    assert!(close(r, 1.0), "{r}");
}
