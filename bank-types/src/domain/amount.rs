//! Monetary amount stored in minor currency units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed monetary amount in minor units (cents).
///
/// Negative values are debits, positive values are credits. Stored as an
/// integer to avoid floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Number of minor units in one major unit.
    pub const SCALE: i64 = 100;

    /// Wraps an amount already expressed in minor units.
    pub fn from_minor_units(minor: i64) -> Self {
        Self(minor)
    }

    /// Converts a decimal currency value into minor units.
    ///
    /// The value is multiplied by 100 and truncated toward zero, so `0.29`
    /// becomes `28` because `0.29 * 100.0` is `28.999…` in binary floating
    /// point. Returns `None` when the result is not finite or does not fit
    /// in an `i64`.
    pub fn from_major_units(value: f64) -> Option<Self> {
        let scaled = (value * Self::SCALE as f64).trunc();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
            Some(Self(scaled as i64))
        } else {
            None
        }
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_debit(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(f, "{}{}.{:02}", sign, abs / scale, abs % scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minor(value: f64) -> i64 {
        Amount::from_major_units(value).unwrap().minor_units()
    }

    #[test]
    fn test_from_major_units_scales_by_100() {
        assert_eq!(minor(10.0), 1000);
        assert_eq!(minor(-10.5), -1050);
        assert_eq!(minor(0.25), 25);
    }

    #[test]
    fn test_from_major_units_truncates() {
        assert_eq!(minor(0.019), 1);
        assert_eq!(minor(-0.019), -1);
        assert_eq!(minor(15.45), 1545);
        assert_eq!(minor(0.29), 28);
        assert!(Amount::from_major_units(0.004).unwrap().is_zero());
    }

    #[test]
    fn test_from_major_units_rejects_out_of_range() {
        assert_eq!(Amount::from_major_units(1e17), None);
        assert_eq!(Amount::from_major_units(-1e17), None);
        assert_eq!(Amount::from_major_units(1e300), None);
        assert_eq!(Amount::from_major_units(f64::INFINITY), None);
        assert_eq!(Amount::from_major_units(f64::NAN), None);
        assert_eq!(minor(1e16), 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_debit_sign() {
        assert!(Amount::from_minor_units(-1).is_debit());
        assert!(!Amount::from_minor_units(1).is_debit());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_minor_units(1050).to_string(), "10.50");
        assert_eq!(Amount::from_minor_units(-5).to_string(), "-0.05");
        assert_eq!(Amount::from_minor_units(0).to_string(), "0.00");
    }
}
