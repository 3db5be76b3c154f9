//! Error types for agreement statistics.

use std::fmt;

/// Which of the two paired samples an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The first sample (`a`).
    First,
    /// The second sample (`b`).
    Second,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// Errors from correlation and distance statistics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// The two samples have different lengths.
    #[error("paired samples differ in length: {len_a} vs {len_b}")]
    LengthMismatch {
        /// Length of the first sample.
        len_a: usize,
        /// Length of the second sample.
        len_b: usize,
    },

    /// Both samples are empty.
    #[error("paired samples are empty")]
    Empty,

    /// One sample is constant, so its standard deviation is zero.
    #[error("the {operand} sample has zero variance")]
    ZeroVariance {
        /// The constant sample.
        operand: Operand,
    },

    /// Every pair is tied in at least one sample, so the tau-b denominator is zero.
    #[error("tie-adjusted pair count is zero")]
    ZeroTieDenominator,
}
