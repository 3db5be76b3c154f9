//! The five-measure comparison record.

use serde::{Deserialize, Serialize};

/// Agreement between two series. Every field is finite.
///
/// Serializes with the wire field names `pearson_r`, `spearman_rho`,
/// `kendall_tau`, `mse` and `dtw`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pearson_r: f64,
    spearman_rho: f64,
    kendall_tau: f64,
    mse: f64,
    dtw: f64,
}

impl ComparisonResult {
    pub(crate) fn new(
        pearson_r: f64,
        spearman_rho: f64,
        kendall_tau: f64,
        mse: f64,
        dtw: f64,
    ) -> Self {
        Self {
            pearson_r,
            spearman_rho,
            kendall_tau,
            mse,
            dtw,
        }
    }

    /// Pearson product-moment correlation.
    #[must_use]
    pub fn pearson_r(&self) -> f64 {
        self.pearson_r
    }

    /// Spearman rank correlation.
    #[must_use]
    pub fn spearman_rho(&self) -> f64 {
        self.spearman_rho
    }

    /// Kendall tau-b.
    #[must_use]
    pub fn kendall_tau(&self) -> f64 {
        self.kendall_tau
    }

    /// Mean squared error.
    #[must_use]
    pub fn mse(&self) -> f64 {
        self.mse
    }

    /// Dynamic time warping distance.
    #[must_use]
    pub fn dtw(&self) -> f64 {
        self.dtw
    }
}
