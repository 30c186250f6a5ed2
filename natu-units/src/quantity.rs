//! Quantity type - a value with an associated power of the base unit

use std::fmt;
use serde::{Serialize, Deserialize};
use natu_core::{Dimension, NatuError, Number};
use natu_plugin::FunctionRegistry;
use crate::BASE_UNIT;

/// A physical quantity: `value × GeV^dimension`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: Number,
    /// Exponent of the base unit
    pub dimension: Dimension,
}

impl Quantity {
    pub fn new(value: Number, dimension: Dimension) -> Self {
        Quantity { value, dimension }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: Number) -> Self {
        Quantity { value, dimension: Dimension::DIMENSIONLESS }
    }

    /// Real value times `GeV^dimension`
    pub fn from_f64(value: f64, dimension: i64) -> Self {
        Quantity::new(Number::from_f64(value), Dimension::from_integer(dimension))
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Two quantities can be added iff their dimensions are equal
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.dimension == other.dimension
    }

    pub fn add(&self, other: &Quantity) -> Result<Quantity, NatuError> {
        if !self.is_compatible(other) {
            return Err(NatuError::unit_mismatch("add", self.dimension, other.dimension));
        }
        Ok(Quantity::new(self.value.add(&other.value), self.dimension))
    }

    pub fn sub(&self, other: &Quantity) -> Result<Quantity, NatuError> {
        if !self.is_compatible(other) {
            return Err(NatuError::unit_mismatch("subtract", self.dimension, other.dimension));
        }
        Ok(Quantity::new(self.value.sub(&other.value), self.dimension))
    }

    pub fn neg(&self) -> Quantity {
        Quantity::new(self.value.neg(), self.dimension)
    }

    /// Multiply two quantities (exponents add)
    pub fn mul(&self, other: &Quantity) -> Result<Quantity, NatuError> {
        let dimension = self.dimension.multiply(&other.dimension)?;
        Ok(Quantity::new(self.value.mul(&other.value), dimension))
    }

    /// Divide two quantities (exponents subtract). A zero divisor yields
    /// `inf` or `NaN` rather than an error.
    pub fn div(&self, other: &Quantity) -> Result<Quantity, NatuError> {
        let dimension = self.dimension.divide(&other.dimension)?;
        Ok(Quantity::new(self.value.div(&other.value), dimension))
    }

    /// Raise to a dimensionless power.
    ///
    /// The numeric value of the exponent scales the dimension, so
    /// `(4 GeV^2)^0.5` is `2 GeV` and `(1 s)^-1` is GeV^1. A dimensionful
    /// base needs a real, finite exponent; a dimensionless base accepts any.
    pub fn pow(&self, exp: &Quantity) -> Result<Quantity, NatuError> {
        if !exp.is_dimensionless() {
            return Err(NatuError::dimensionful_exponent(exp.dimension));
        }
        let value = self.value.pow(&exp.value);
        if self.is_dimensionless() {
            return Ok(Quantity::dimensionless(value));
        }

        let scale = exp.value.to_f64()
            .filter(|e| e.is_finite())
            .ok_or_else(|| NatuError::domain_error(format!(
                "exponent {} of a GeV^{} quantity must be a finite real number",
                exp.value, self.dimension
            )))?;
        let scale = Dimension::from_f64(scale).ok_or_else(|| NatuError::domain_error(format!(
            "exponent {} has no rational approximation", exp.value
        )))?;
        Ok(Quantity::new(value, self.dimension.power(&scale)?))
    }

    /// Principal square root; halves the dimension
    pub fn sqrt(&self) -> Result<Quantity, NatuError> {
        Ok(Quantity::new(self.value.sqrt(), self.dimension.half()?))
    }

    /// Apply a scalar function to dimensionless arguments.
    ///
    /// Arguments are reduced to bare numbers before the call and the result
    /// is dimensionless.
    pub fn apply(name: &str, args: &[Quantity], functions: &FunctionRegistry) -> Result<Quantity, NatuError> {
        if let Some(arg) = args.iter().find(|a| !a.is_dimensionless()) {
            return Err(NatuError::dimensional_function_arg(name, arg.dimension));
        }
        let values: Vec<Number> = args.iter().map(|a| a.value).collect();
        let result = functions.call(name, &values)?;
        Ok(Quantity::dimensionless(result))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            write!(f, "{}", self.value)
        } else if self.dimension == Dimension::BASE {
            write!(f, "{} {}", self.value, BASE_UNIT)
        } else if self.dimension.is_integer() {
            write!(f, "{} {}^{}", self.value, BASE_UNIT, self.dimension)
        } else {
            write!(f, "{} {}^({})", self.value, BASE_UNIT, self.dimension)
        }
    }
}
