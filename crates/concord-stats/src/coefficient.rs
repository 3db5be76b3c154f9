//! Correlation coefficient newtype.

use std::fmt;

/// A correlation coefficient in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Coefficient(f64);

impl Coefficient {
    /// Wrap a raw ratio, clamping rounding overshoot into `[-1, 1]`.
    pub(crate) fn from_ratio(value: f64) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    /// Raw coefficient value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Coefficient> for f64 {
    fn from(c: Coefficient) -> Self {
        c.0
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.6}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_overshoot() {
        assert_eq!(Coefficient::from_ratio(1.000_000_000_000_2).value(), 1.0);
        assert_eq!(Coefficient::from_ratio(-1.5).value(), -1.0);
    }

    #[test]
    fn display_is_signed() {
        assert_eq!(Coefficient::from_ratio(0.25).to_string(), "+0.250000");
    }
}
