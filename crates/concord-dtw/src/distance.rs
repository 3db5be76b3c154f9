//! DTW distance newtype.

use std::cmp::Ordering;
use std::fmt;

/// Accumulated absolute-difference cost of an optimal warping path.
///
/// Non-negative. Infinite only when the search window admits no path, which
/// cannot happen for windows produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DtwDistance(f64);

impl DtwDistance {
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw distance value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Total ordering via [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<DtwDistance> for f64 {
    fn from(d: DtwDistance) -> Self {
        d.0
    }
}

impl fmt::Display for DtwDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_six_decimals() {
        assert_eq!(DtwDistance::new(2.5).to_string(), "2.500000");
    }

    #[test]
    fn orders_by_value() {
        let near = DtwDistance::new(0.5);
        let far = DtwDistance::new(3.0);
        assert_eq!(near.total_cmp(&far), Ordering::Less);
        assert_eq!(f64::from(far), 3.0);
    }
}
