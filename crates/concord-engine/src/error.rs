//! Comparison error taxonomy.

use std::fmt;

use concord_stats::StatsError;
use serde::Serialize;

/// Which input series an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesLabel {
    /// The first series (`seriesA` on the wire).
    A,
    /// The second series (`seriesB` on the wire).
    B,
}

impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("seriesA"),
            Self::B => f.write_str("seriesB"),
        }
    }
}

/// One of the five agreement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Pearson product-moment correlation.
    Pearson,
    /// Spearman rank correlation.
    Spearman,
    /// Kendall tau-b.
    Kendall,
    /// Mean squared error.
    Mse,
    /// Dynamic time warping distance.
    Dtw,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pearson => "pearson_r",
            Self::Spearman => "spearman_rho",
            Self::Kendall => "kendall_tau",
            Self::Mse => "mse",
            Self::Dtw => "dtw",
        })
    }
}

/// Stable classification of a [`CompareError`], as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// A series has no values.
    EmptySeries,
    /// The series differ in length.
    LengthMismatch,
    /// A value is not a finite number.
    NonNumericValue,
    /// A measure is undefined for the inputs (zero variance, all pairs tied).
    DegenerateSeries,
    /// Unexpected fault inside the engine.
    Internal,
}

impl ErrorKind {
    /// Kind name as it appears in error responses.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptySeries => "EmptySeries",
            Self::LengthMismatch => "LengthMismatch",
            Self::NonNumericValue => "NonNumericValue",
            Self::DegenerateSeries => "DegenerateSeries",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the caller or the engine is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The input was rejected; retrying with the same input gives the same error.
    ClientInput,
    /// The engine failed on input it accepted.
    Internal,
}

impl Status {
    /// HTTP-equivalent status code.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::ClientInput => 400,
            Self::Internal => 500,
        }
    }
}

/// Errors from validating and comparing two series.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    /// Returned when either series has no values.
    #[error("{series} is empty")]
    EmptySeries {
        /// The empty series.
        series: SeriesLabel,
    },

    /// Returned when the series have different lengths.
    #[error("series length mismatch: seriesA has {len_a} values, seriesB has {len_b}")]
    LengthMismatch {
        /// Length of `seriesA`.
        len_a: usize,
        /// Length of `seriesB`.
        len_b: usize,
    },

    /// Returned when a value is NaN, infinite, or was not numeric to begin with.
    #[error("{series} has a non-numeric value at index {index}")]
    NonNumericValue {
        /// The offending series.
        series: SeriesLabel,
        /// Zero-based position of the first bad value.
        index: usize,
    },

    /// Returned when a measure is undefined for otherwise valid input.
    #[error("{measure} is undefined: {source}")]
    DegenerateSeries {
        /// The measure that could not be computed.
        measure: Measure,
        /// Why it is undefined.
        source: StatsError,
    },

    /// Returned when a measure evaluates to NaN or an infinity, e.g. on overflow.
    #[error("internal error computing {measure}")]
    NonFiniteResult {
        /// The measure that produced the value.
        measure: Measure,
    },
}

impl CompareError {
    /// Stable classification for responses.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySeries { .. } => ErrorKind::EmptySeries,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::NonNumericValue { .. } => ErrorKind::NonNumericValue,
            Self::DegenerateSeries { .. } => ErrorKind::DegenerateSeries,
            Self::NonFiniteResult { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the caller or the engine is at fault.
    #[must_use]
    pub fn status(&self) -> Status {
        match self.kind() {
            ErrorKind::Internal => Status::Internal,
            _ => Status::ClientInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_stats::Operand;

    #[test]
    fn client_errors_map_to_400() {
        let errors = [
            CompareError::EmptySeries { series: SeriesLabel::A },
            CompareError::LengthMismatch { len_a: 2, len_b: 3 },
            CompareError::NonNumericValue { series: SeriesLabel::B, index: 4 },
            CompareError::DegenerateSeries {
                measure: Measure::Pearson,
                source: StatsError::ZeroVariance { operand: Operand::First },
            },
        ];
        for e in errors {
            assert_eq!(e.status(), Status::ClientInput, "{e}");
            assert_eq!(e.status().code(), 400);
        }
    }

    #[test]
    fn non_finite_result_is_internal() {
        let e = CompareError::NonFiniteResult { measure: Measure::Mse };
        assert_eq!(e.kind(), ErrorKind::Internal);
        assert_eq!(e.status().code(), 500);
        assert_eq!(e.to_string(), "internal error computing mse");
    }

    #[test]
    fn messages_name_the_series() {
        let e = CompareError::NonNumericValue { series: SeriesLabel::B, index: 2 };
        assert_eq!(e.to_string(), "seriesB has a non-numeric value at index 2");
        let e = CompareError::DegenerateSeries {
            measure: Measure::Kendall,
            source: StatsError::ZeroTieDenominator,
        };
        assert_eq!(e.to_string(), "kendall_tau is undefined: tie-adjusted pair count is zero");
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(ErrorKind::LengthMismatch.as_str(), "LengthMismatch");
        assert_eq!(ErrorKind::Internal.to_string(), "Internal");
    }
}
