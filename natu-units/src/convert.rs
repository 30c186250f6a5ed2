//! Re-expressing a quantity in terms of a target unit
//!
//! The target becomes the new reporting basis. `1 GeV` in `MeV` is
//! `1000 MeV^1`; `1 GeV` in `GeV^2` is `1 (GeV^2)^(1/2)`; a dimensionless
//! result in a dimensionless target is a plain rescale reported as `^1`.

use natu_core::{Dimension, NatuError};
use crate::Quantity;

/// Express `result` as `value × target^dimension`
pub fn convert(result: &Quantity, target: &Quantity) -> Result<Quantity, NatuError> {
    let dimension = if !target.is_dimensionless() {
        result.dimension.ratio(&target.dimension)?
    } else if result.is_dimensionless() {
        Dimension::BASE
    } else {
        return Err(NatuError::cannot_convert_to_dimensionless(result.dimension));
    };

    let scale = target.value.powf(dimension.to_f64());
    let converted = Quantity::new(result.value.div(&scale), dimension);
    tracing::trace!(
        from = %result.dimension,
        to = %target.dimension,
        exponent = %dimension,
        "converted quantity"
    );
    Ok(converted)
}

/// Undo `convert`: turn `value × target^dimension` back into base units
pub fn restore(converted: &Quantity, target: &Quantity) -> Result<Quantity, NatuError> {
    let scale = target.value.powf(converted.dimension.to_f64());
    let dimension = converted.dimension.power(&target.dimension)?;
    Ok(Quantity::new(converted.value.mul(&scale), dimension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use natu_core::{codes, Number};
    use proptest::prelude::*;

    fn q(v: f64, d: i64) -> Quantity {
        Quantity::from_f64(v, d)
    }

    #[test]
    fn test_same_kind() {
        let mev = q(1e-3, 1);
        let result = convert(&q(1.0, 1), &mev).unwrap();
        assert_relative_eq!(result.value.re(), 1000.0, max_relative = 1e-12);
        assert_eq!(result.dimension, Dimension::BASE);
    }

    #[test]
    fn test_self_conversion_is_one() {
        let s = q(1.519e24, -1);
        let result = convert(&s, &s).unwrap();
        assert_eq!(result.value.to_f64(), Some(1.0));
        assert_eq!(result.dimension, Dimension::BASE);
    }

    #[test]
    fn test_fractional_exponent() {
        let result = convert(&q(3.0, 1), &q(1.0, 2)).unwrap();
        assert_eq!(result.dimension, Dimension::new(1, 2).unwrap());
        assert_relative_eq!(result.value.re(), 3.0);
    }

    #[test]
    fn test_inverse_exponent() {
        // 1 GeV expressed in seconds is s^-1
        let s = q(1.519267e24, -1);
        let result = convert(&q(1.0, 1), &s).unwrap();
        assert_eq!(result.dimension, Dimension::from_integer(-1));
        assert_relative_eq!(result.value.re(), 1.519267e24, max_relative = 1e-12);
    }

    #[test]
    fn test_dimensionless_both() {
        let result = convert(&q(6.0, 0), &q(2.0, 0)).unwrap();
        assert_eq!(result, q(3.0, 1));
    }

    #[test]
    fn test_dimensionless_target_rejected() {
        let err = convert(&q(1.0, 1), &q(2.0, 0)).unwrap_err();
        assert!(err.is(codes::CANNOT_CONVERT_TO_DIMENSIONLESS));
        assert!(err.message.starts_with("Can not convert to dimensionless"));
    }

    #[test]
    fn test_complex_value_converts() {
        let z = Quantity::new(Number::from_complex(0.0, 2.0), Dimension::BASE);
        let result = convert(&z, &q(2.0, 1)).unwrap();
        assert_eq!(result.value, Number::I);
    }

    #[test]
    fn test_restore_dimensionless() {
        let target = q(2.0, 0);
        let back = restore(&convert(&q(6.0, 0), &target).unwrap(), &target).unwrap();
        assert_eq!(back, q(6.0, 0));
    }

    fn value() -> impl Strategy<Value = f64> {
        prop_oneof![-1e3f64..-1e-3, 1e-3f64..1e3]
    }

    proptest! {
        #[test]
        fn prop_round_trip(v in value(), t in 1e-3f64..1e3, dn in -6i64..6, dd in 1i64..4, tn in 1i64..4, neg in any::<bool>()) {
            let result = Quantity::new(Number::from_f64(v), Dimension::new(dn, dd).unwrap());
            let tn = if neg { -tn } else { tn };
            let target = Quantity::new(Number::from_f64(t), Dimension::from_integer(tn));
            let converted = convert(&result, &target).unwrap();
            let back = restore(&converted, &target).unwrap();
            prop_assert_eq!(back.dimension, result.dimension);
            assert_relative_eq!(back.value.re(), v, max_relative = 1e-9);
        }

        #[test]
        fn prop_self_conversion(v in 1e-3f64..1e3, d in -6i64..6) {
            prop_assume!(d != 0);
            let x = q(v, d);
            let converted = convert(&x, &x).unwrap();
            prop_assert_eq!(converted.dimension, Dimension::BASE);
            assert_relative_eq!(converted.value.re(), 1.0, max_relative = 1e-12);
        }
    }
}
