//! Complex-capable numbers on top of `f64`
//!
//! Values stay on the real `f64` path while every operand is real, so
//! `1 / 0` is `inf` and `sqrt(4)` is exactly `2`. Complex arithmetic via
//! `num-complex` kicks in only when an operand is non-real or an operation
//! leaves the real domain (`sqrt(-4) = 2i`, `(-8)^(1/3)`).

use num_complex::Complex64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Significant digits used by `Display`
pub const DEFAULT_PRECISION: usize = 10;

/// Digits needed to round-trip any `f64`
const EXACT_PRECISION: usize = 17;

/// A real or complex number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    inner: Complex64,
}

impl Number {
    pub const ZERO: Number = Number { inner: Complex64::new(0.0, 0.0) };
    pub const ONE: Number = Number { inner: Complex64::new(1.0, 0.0) };
    /// The imaginary unit
    pub const I: Number = Number { inner: Complex64::new(0.0, 1.0) };

    // ========== Construction ==========

    pub fn from_f64(f: f64) -> Self {
        Self { inner: Complex64::new(f, 0.0) }
    }

    pub fn from_i64(n: i64) -> Self {
        Self::from_f64(n as f64)
    }

    pub fn from_complex(re: f64, im: f64) -> Self {
        Self { inner: Complex64::new(re, im) }
    }

    /// Parse a number.
    /// Supports: "123", "3.14", ".5", "1.5e10", "-42", "2i", "1 + 2i", "1 - i"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumberError::ParseError(s.to_string()));
        }

        let Some(body) = s.strip_suffix('i') else {
            return parse_real(s).map(Self::from_f64);
        };

        // Split "re ± im" at the last sign that is not part of an exponent
        let split = body
            .char_indices()
            .filter(|&(pos, c)| {
                (c == '+' || c == '-')
                    && pos > 0
                    && !matches!(body[..pos].trim_end().chars().last(), Some('e' | 'E'))
            })
            .map(|(pos, _)| pos)
            .last();

        let (re, im) = match split {
            Some(pos) => (parse_real(&body[..pos])?, parse_imaginary(&body[pos..])?),
            None => (0.0, parse_imaginary(body)?),
        };
        Ok(Self::from_complex(re, im))
    }

    // ========== Inspection ==========

    pub fn re(&self) -> f64 {
        self.inner.re
    }

    pub fn im(&self) -> f64 {
        self.inner.im
    }

    pub fn as_complex(&self) -> Complex64 {
        self.inner
    }

    pub fn is_real(&self) -> bool {
        self.inner.im == 0.0
    }

    /// The value as `f64` when it has no imaginary part
    pub fn to_f64(&self) -> Option<f64> {
        self.is_real().then_some(self.inner.re)
    }

    pub fn is_zero(&self) -> bool {
        self.inner.re == 0.0 && self.inner.im == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.inner.re.is_finite() && self.inner.im.is_finite()
    }

    pub fn is_integer(&self) -> bool {
        self.is_real() && self.inner.re.is_finite() && self.inner.re.fract() == 0.0
    }

    // ========== Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: self.inner + other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: self.inner - other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        match (self.to_f64(), other.to_f64()) {
            (Some(a), Some(b)) => Self::from_f64(a * b),
            _ => Self { inner: self.inner * other.inner },
        }
    }

    /// Division; a zero divisor follows IEEE semantics (`inf` or `NaN`)
    pub fn div(&self, other: &Self) -> Self {
        match (self.to_f64(), other.to_f64()) {
            (Some(a), Some(b)) => Self::from_f64(a / b),
            _ => Self { inner: self.inner / other.inner },
        }
    }

    pub fn neg(&self) -> Self {
        Self { inner: -self.inner }
    }

    /// Principal value of `self ^ exp`
    pub fn pow(&self, exp: &Self) -> Self {
        if let (Some(base), Some(e)) = (self.to_f64(), exp.to_f64()) {
            if base >= 0.0 || e.fract() == 0.0 || !e.is_finite() || base.is_nan() {
                return Self::from_f64(base.powf(e));
            }
        }

        if let Some(e) = exp.to_f64() {
            if e.fract() == 0.0 && e.abs() <= i32::MAX as f64 {
                return Self { inner: self.inner.powi(e as i32) };
            }
        }

        if self.is_zero() {
            return if exp.re() > 0.0 { Self::ZERO } else { Self::from_f64(f64::NAN) };
        }

        Self { inner: self.inner.powc(exp.inner) }
    }

    pub fn powf(&self, exp: f64) -> Self {
        self.pow(&Self::from_f64(exp))
    }

    /// Principal square root; negative reals promote to the imaginary axis
    pub fn sqrt(&self) -> Self {
        match self.to_f64() {
            Some(x) if x >= 0.0 || x.is_nan() => Self::from_f64(x.sqrt()),
            Some(x) => Self::from_complex(0.0, (-x).sqrt()),
            None => Self { inner: self.inner.sqrt() },
        }
    }

    /// Absolute value (modulus for complex values)
    pub fn abs(&self) -> Self {
        match self.to_f64() {
            Some(x) => Self::from_f64(x.abs()),
            None => Self::from_f64(self.inner.norm()),
        }
    }

    // ========== Rendering ==========

    /// Render with `precision` significant digits.
    ///
    /// Exponential notation is used when the decimal exponent is below -3 or
    /// at least 5; trailing zeros are dropped. Complex values render as
    /// `a + bi`, and a part that is negligible relative to the other at this
    /// precision is dropped.
    pub fn format(&self, precision: usize) -> String {
        let precision = precision.clamp(1, EXACT_PRECISION);
        let mut re = self.inner.re;
        let mut im = self.inner.im;

        if im != 0.0 && re != 0.0 {
            let epsilon = 10f64.powi(-(precision as i32));
            if (re / im).abs() < epsilon {
                re = 0.0;
            }
            if (im / re).abs() < epsilon {
                im = 0.0;
            }
        }

        if im == 0.0 {
            return format_real(re, precision);
        }

        let imaginary = |v: f64| {
            if v == 1.0 {
                "i".to_string()
            } else {
                format!("{}i", format_real(v, precision))
            }
        };

        if re == 0.0 {
            return if im == -1.0 { "-i".to_string() } else { imaginary(im) };
        }

        let re_str = format_real(re, precision);
        if im < 0.0 {
            format!("{} - {}", re_str, imaginary(-im))
        } else {
            format!("{} + {}", re_str, imaginary(im))
        }
    }
}

fn parse_real(s: &str) -> Result<f64, NumberError> {
    let s = s.trim();
    let digits = s.trim_start_matches(['+', '-']);
    // Reject "inf", "NaN" and friends that f64::from_str would accept
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(NumberError::ParseError(s.to_string()));
    }
    s.parse::<f64>().map_err(|_| NumberError::ParseError(s.to_string()))
}

fn parse_imaginary(s: &str) -> Result<f64, NumberError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.as_str() {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        other => parse_real(other),
    }
}

/// Format a real number with `precision` significant digits
fn format_real(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if x == 0.0 {
        return "0".to_string();
    }

    // Rounding through `{:e}` yields the digits and the post-rounding exponent
    let sci = format!("{:.*e}", precision - 1, x.abs());
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let sign = if x < 0.0 { "-" } else { "" };

    if !(-3..5).contains(&exponent) {
        let (head, tail) = digits.split_at(1);
        let mantissa = if tail.is_empty() { head.to_string() } else { format!("{}.{}", head, tail) };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}{}e{}{}", sign, mantissa, exp_sign, exponent.abs());
    }

    let body = if exponent < 0 {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
    } else {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    };
    format!("{}{}", sign, body)
}

// ========== Trait Implementations ==========

impl Default for Number {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Self::from_f64(f)
    }
}

impl From<Complex64> for Number {
    fn from(c: Complex64) -> Self {
        Self { inner: c }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(f.precision().unwrap_or(DEFAULT_PRECISION)))
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format(EXACT_PRECISION))
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // Non-finite values serialize under their display spellings
        match s.trim() {
            "Infinity" => Ok(Self::from_f64(f64::INFINITY)),
            "-Infinity" => Ok(Self::from_f64(f64::NEG_INFINITY)),
            "NaN" => Ok(Self::from_f64(f64::NAN)),
            other => Self::from_str(other).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_complex_forms() {
        assert_eq!(Number::from_str("2i").unwrap(), Number::from_complex(0.0, 2.0));
        assert_eq!(Number::from_str("i").unwrap(), Number::I);
        assert_eq!(Number::from_str("1 + 2i").unwrap(), Number::from_complex(1.0, 2.0));
        assert_eq!(Number::from_str("1 - i").unwrap(), Number::from_complex(1.0, -1.0));
        assert_eq!(Number::from_str("1e-3 + 1e+2i").unwrap(), Number::from_complex(1e-3, 100.0));
    }

    #[test]
    fn test_parse_rejects_words() {
        assert!(Number::from_str("inf").is_err());
        assert!(Number::from_str("NaN").is_err());
        assert!(Number::from_str("").is_err());
        assert!(Number::from_str("GeV").is_err());
    }

    #[test]
    fn test_real_division_by_zero() {
        let q = Number::ONE.div(&Number::ZERO);
        assert_eq!(q.to_f64(), Some(f64::INFINITY));
        let nan = Number::ZERO.div(&Number::ZERO);
        assert!(nan.re().is_nan());
    }

    #[test]
    fn test_sqrt_negative_is_imaginary() {
        assert_eq!(Number::from_f64(-4.0).sqrt(), Number::from_complex(0.0, 2.0));
        assert_eq!(Number::from_f64(16.0).sqrt(), Number::from_f64(4.0));
    }

    #[test]
    fn test_pow_paths() {
        assert_eq!(Number::from_f64(2.0).powf(10.0), Number::from_f64(1024.0));
        assert_eq!(Number::I.powf(2.0), Number::from_f64(-1.0));

        let root = Number::from_f64(-8.0).powf(1.0 / 3.0);
        assert_relative_eq!(root.re(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(root.im(), 3f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_format_fixed_and_exponential() {
        assert_eq!(Number::from_f64(1000.0).format(10), "1000");
        assert_eq!(Number::from_f64(2.003).format(10), "2.003");
        assert_eq!(Number::from_f64(0.001).format(10), "0.001");
        assert_eq!(Number::from_f64(99999.0).format(10), "99999");
        assert_eq!(Number::from_f64(100000.0).format(10), "1e+5");
        assert_eq!(Number::from_f64(1.782661731e-27).format(10), "1.782661731e-27");
        assert_eq!(Number::from_f64(-0.0001234).format(10), "-1.234e-4");
        assert_eq!(Number::from_f64(1.0 / 3.0).format(10), "0.3333333333");
    }

    #[test]
    fn test_format_rounding_carries_exponent() {
        assert_eq!(Number::from_f64(99999.999999).format(10), "1e+5");
        assert_eq!(Number::from_f64(2.0000000000004).format(10), "2");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(Number::from_f64(f64::INFINITY).format(10), "Infinity");
        assert_eq!(Number::from_f64(f64::NEG_INFINITY).format(10), "-Infinity");
        assert_eq!(Number::from_f64(f64::NAN).format(10), "NaN");
        assert_eq!(Number::ZERO.format(10), "0");
    }

    #[test]
    fn test_format_complex() {
        assert_eq!(Number::I.format(10), "i");
        assert_eq!(Number::from_complex(0.0, -1.0).format(10), "-i");
        assert_eq!(Number::from_complex(0.0, 2.0).format(10), "2i");
        assert_eq!(Number::from_complex(1.0, 2.0).format(10), "1 + 2i");
        assert_eq!(Number::from_complex(1.0, -2.5).format(10), "1 - 2.5i");
        assert_eq!(Number::from_complex(3.0, 1e-20).format(10), "3");
    }

    #[test]
    fn test_display_uses_formatter_precision() {
        let third = Number::from_f64(1.0 / 3.0);
        assert_eq!(format!("{}", third), "0.3333333333");
        assert_eq!(format!("{:.3}", third), "0.333");
    }

    #[test]
    fn test_serde_roundtrip_keeps_value() {
        let n = Number::from_complex(0.1, -2.0);
        let json = serde_json::to_string(&n).unwrap();
        let back: Number = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn test_serde_non_finite() {
        for value in [f64::INFINITY, f64::NEG_INFINITY] {
            let json = serde_json::to_string(&Number::from_f64(value)).unwrap();
            let back: Number = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_f64(), Some(value));
        }

        let json = serde_json::to_string(&Number::from_f64(f64::NAN)).unwrap();
        assert_eq!(json, "\"NaN\"");
        let back: Number = serde_json::from_str(&json).unwrap();
        assert!(back.re().is_nan());

        // Literal parsing stays strict
        assert!(Number::from_str("Infinity").is_err());
    }
}
