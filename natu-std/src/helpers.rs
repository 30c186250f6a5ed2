//! Shared plumbing for scalar functions

use natu_core::{NatuError, Number};
use num_complex::Complex64;

/// Apply `real` while the argument is real and `real` accepts it, else `complex`
pub(crate) fn real_or_complex(
    x: &Number,
    real: impl Fn(f64) -> Option<f64>,
    complex: impl Fn(Complex64) -> Complex64,
) -> Number {
    if let Some(v) = x.to_f64().and_then(real) {
        return Number::from_f64(v);
    }
    Number::from(complex(x.as_complex()))
}

/// Apply a rounding-style function to the real and imaginary parts separately
pub(crate) fn per_part(x: &Number, f: impl Fn(f64) -> f64) -> Number {
    Number::from_complex(f(x.re()), f(x.im()))
}

/// Real value of an argument or a domain error naming the function
pub(crate) fn require_real(func: &str, arg: &str, x: &Number) -> Result<f64, NatuError> {
    x.to_f64().ok_or_else(|| {
        NatuError::domain_error(format!("{}() argument {} must be real, got {}", func, arg, x))
    })
}

/// Argument that must be a non-negative integer
pub(crate) fn require_digits(func: &str, x: &Number) -> Result<i32, NatuError> {
    let n = require_real(func, "n", x)?;
    if n.fract() != 0.0 || !(0.0..=15.0).contains(&n) {
        return Err(NatuError::domain_error(format!(
            "{}() digits must be an integer between 0 and 15, got {}", func, x
        )));
    }
    Ok(n as i32)
}
