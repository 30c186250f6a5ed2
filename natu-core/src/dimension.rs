//! Dimensional analysis over a single base unit
//!
//! A dimension is the exact rational exponent of the base unit. Equality is
//! rational equality, so `2/4` and `1/2` are the same dimension.

use std::fmt;
use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use crate::NumberError;

/// Exponent of the base unit carried by a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    exponent: Rational64,
}

impl Dimension {
    /// Dimensionless quantity (exponent zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponent: Rational64::new_raw(0, 1) };

    /// The base unit itself
    pub const BASE: Dimension = Dimension { exponent: Rational64::new_raw(1, 1) };

    /// Create `numer / denom`, reduced to lowest terms
    pub fn new(numer: i64, denom: i64) -> Result<Self, NumberError> {
        if denom == 0 {
            return Err(NumberError::DivisionByZero);
        }
        if numer == i64::MIN || denom == i64::MIN {
            return Err(NumberError::Overflow);
        }
        Ok(Dimension { exponent: Rational64::new(numer, denom) })
    }

    pub fn from_integer(n: i64) -> Self {
        Dimension { exponent: Rational64::from_integer(n) }
    }

    /// Closest small rational to a float exponent.
    ///
    /// `None` for NaN or infinity, and for exponents no `i64` fraction
    /// matches to within a relative `1e-9`, such as `1e-20`, which would
    /// otherwise round to zero and drop the dimension.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        let exponent = Rational64::approximate_float(f)?;
        let approx = exponent.to_f64()?;
        if (approx - f).abs() > 1e-9 * f.abs() {
            return None;
        }
        Some(Dimension { exponent })
    }

    pub fn numer(&self) -> i64 {
        *self.exponent.numer()
    }

    pub fn denom(&self) -> i64 {
        *self.exponent.denom()
    }

    pub fn exponent(&self) -> Rational64 {
        self.exponent
    }

    pub fn to_f64(&self) -> f64 {
        self.exponent.to_f64().unwrap_or(f64::NAN)
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponent.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.exponent.is_integer()
    }

    /// Multiply quantities (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Result<Dimension, NumberError> {
        self.exponent
            .checked_add(&other.exponent)
            .map(|exponent| Dimension { exponent })
            .ok_or(NumberError::Overflow)
    }

    /// Divide quantities (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Result<Dimension, NumberError> {
        self.exponent
            .checked_sub(&other.exponent)
            .map(|exponent| Dimension { exponent })
            .ok_or(NumberError::Overflow)
    }

    /// Raise to a rational power (scale the exponent)
    pub fn power(&self, exp: &Dimension) -> Result<Dimension, NumberError> {
        self.exponent
            .checked_mul(&exp.exponent)
            .map(|exponent| Dimension { exponent })
            .ok_or(NumberError::Overflow)
    }

    /// Ratio of two exponents, used to re-express one dimension in terms of another
    pub fn ratio(&self, other: &Dimension) -> Result<Dimension, NumberError> {
        if other.is_dimensionless() {
            return Err(NumberError::DivisionByZero);
        }
        self.exponent
            .checked_div(&other.exponent)
            .map(|exponent| Dimension { exponent })
            .ok_or(NumberError::Overflow)
    }

    /// Halve the exponent (square root)
    pub fn half(&self) -> Result<Dimension, NumberError> {
        self.ratio(&Dimension::from_integer(2))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

impl From<i64> for Dimension {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::BASE.is_dimensionless());
        assert_eq!(Dimension::default(), Dimension::DIMENSIONLESS);
    }

    #[test]
    fn test_normalized_equality() {
        assert_eq!(Dimension::new(2, 4).unwrap(), Dimension::new(1, 2).unwrap());
        assert_eq!(Dimension::new(1, -2).unwrap(), Dimension::new(-1, 2).unwrap());
        assert_eq!(Dimension::new(-3, -6).unwrap().denom(), 2);
        assert!(Dimension::new(1, 0).is_err());
    }

    #[test]
    fn test_multiply_divide() {
        let one = Dimension::BASE;
        let minus_one = Dimension::from_integer(-1);
        assert_eq!(one.multiply(&minus_one).unwrap(), Dimension::DIMENSIONLESS);
        assert_eq!(one.divide(&minus_one).unwrap(), Dimension::from_integer(2));
    }

    #[test]
    fn test_ratio_and_half() {
        let two = Dimension::from_integer(2);
        assert_eq!(Dimension::BASE.ratio(&two).unwrap(), Dimension::new(1, 2).unwrap());
        assert_eq!(Dimension::BASE.half().unwrap(), Dimension::new(1, 2).unwrap());
        assert_eq!(two.ratio(&Dimension::DIMENSIONLESS), Err(NumberError::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Dimension::from_integer(i64::MAX);
        assert_eq!(huge.multiply(&huge), Err(NumberError::Overflow));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Dimension::from_f64(0.5), Some(Dimension::new(1, 2).unwrap()));
        assert_eq!(Dimension::from_f64(-3.0), Some(Dimension::from_integer(-3)));
        assert_eq!(Dimension::from_f64(1.0 / 3.0), Some(Dimension::new(1, 3).unwrap()));
        assert_eq!(Dimension::from_f64(f64::NAN), None);
        assert_eq!(Dimension::from_f64(0.0), Some(Dimension::DIMENSIONLESS));
    }

    #[test]
    fn test_from_f64_keeps_tiny_exponents() {
        assert_eq!(Dimension::from_f64(1e-20), None);
        assert_eq!(Dimension::from_f64(-1e-25), None);
        assert_eq!(Dimension::from_f64(1e-3), Some(Dimension::new(1, 1000).unwrap()));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "0");
        assert_eq!(format!("{}", Dimension::from_integer(-2)), "-2");
        assert_eq!(format!("{}", Dimension::new(-1, 2).unwrap()), "-1/2");
    }

    proptest! {
        #[test]
        fn prop_add_then_sub_is_identity(a in -1000i64..1000, b in 1i64..50, c in -1000i64..1000, d in 1i64..50) {
            let x = Dimension::new(a, b).unwrap();
            let y = Dimension::new(c, d).unwrap();
            prop_assert_eq!(x.multiply(&y).unwrap().divide(&y).unwrap(), x);
        }

        #[test]
        fn prop_double_then_half(a in -1000i64..1000, b in 1i64..50) {
            let x = Dimension::new(a, b).unwrap();
            let doubled = x.power(&Dimension::from_integer(2)).unwrap();
            prop_assert_eq!(doubled.half().unwrap(), x);
        }
    }
}
