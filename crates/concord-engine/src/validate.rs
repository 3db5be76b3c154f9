//! Structural checks that gate every comparison.

use concord_dtw::{DtwError, TimeSeriesView};

use crate::error::{CompareError, SeriesLabel};

/// Two validated series of equal, non-zero length with only finite values.
///
/// Borrowed from the caller for the duration of one comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPair<'a> {
    a: TimeSeriesView<'a>,
    b: TimeSeriesView<'a>,
}

impl<'a> SeriesPair<'a> {
    /// First series.
    #[must_use]
    pub fn a(&self) -> TimeSeriesView<'a> {
        self.a
    }

    /// Second series.
    #[must_use]
    pub fn b(&self) -> TimeSeriesView<'a> {
        self.b
    }

    /// Common length of both series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Always `false` for a validated pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Check the preconditions of a comparison.
///
/// Checks run in a fixed order so the reported error is reproducible:
/// emptiness (A before B), then length, then finiteness (A before B).
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`CompareError::EmptySeries`] | Either series has no values |
/// | [`CompareError::LengthMismatch`] | `a.len() != b.len()` |
/// | [`CompareError::NonNumericValue`] | A value is NaN or infinite |
pub fn validate<'a>(a: &'a [f64], b: &'a [f64]) -> Result<SeriesPair<'a>, CompareError> {
    if a.is_empty() {
        return Err(CompareError::EmptySeries { series: SeriesLabel::A });
    }
    if b.is_empty() {
        return Err(CompareError::EmptySeries { series: SeriesLabel::B });
    }
    if a.len() != b.len() {
        return Err(CompareError::LengthMismatch {
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    Ok(SeriesPair {
        a: view(a, SeriesLabel::A)?,
        b: view(b, SeriesLabel::B)?,
    })
}

fn view(values: &[f64], series: SeriesLabel) -> Result<TimeSeriesView<'_>, CompareError> {
    TimeSeriesView::new(values).map_err(|e| match e {
        DtwError::EmptySeries => CompareError::EmptySeries { series },
        DtwError::NonFiniteValue { index } => CompareError::NonNumericValue { series, index },
    })
}
