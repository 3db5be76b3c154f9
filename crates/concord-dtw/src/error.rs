//! Error types for time series validation.

/// Errors raised while validating a series before alignment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// The series has no observations.
    #[error("time series must contain at least one value")]
    EmptySeries,

    /// The series holds NaN or an infinity.
    #[error("time series value at index {index} is not a finite number")]
    NonFiniteValue {
        /// Zero-based position of the first offending value.
        index: usize,
    },
}
