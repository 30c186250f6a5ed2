//! natu Core - Fundamental types
//!
//! This crate provides the core types used throughout natu:
//! - `Number`: real or complex `f64` values
//! - `Dimension`: exact rational exponent of the base unit
//! - `NatuError`: structured errors with machine-readable codes

mod number;
mod dimension;
mod error;

pub use number::{Number, NumberError, DEFAULT_PRECISION};
pub use dimension::Dimension;
pub use error::{NatuError, ErrorContext, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, Dimension, NatuError, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_f64(), Some(42.0));
        }

        #[test]
        fn test_from_str_scientific() {
            let n = Number::from_str("1e-3").unwrap();
            assert_eq!(n.to_f64(), Some(0.001));
        }

        #[test]
        fn test_from_str_leading_dot() {
            let n = Number::from_str(".5").unwrap();
            assert_eq!(n.to_f64(), Some(0.5));
        }

        #[test]
        fn test_complex_is_not_real() {
            assert!(!Number::I.is_real());
            assert_eq!(Number::I.to_f64(), None);
        }

        #[test]
        fn test_is_integer() {
            assert!(Number::from_f64(3.0).is_integer());
            assert!(!Number::from_f64(3.5).is_integer());
            assert!(!Number::I.is_integer());
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_display() {
            let err = NatuError::unknown_unit("furlong");
            let text = format!("{}", err);
            assert!(text.starts_with("[UNKNOWN_UNIT] Unknown unit: furlong"));
            assert!(text.contains("suggestion"));
        }

        #[test]
        fn test_number_error_conversion() {
            let err: NatuError = NumberError::Overflow.into();
            assert!(err.is(codes::OVERFLOW));

            let err: NatuError = NumberError::ParseError("1.2.3".to_string()).into();
            assert!(err.is(codes::PARSE_ERROR));
            assert!(err.message.contains("1.2.3"));
        }

        #[test]
        fn test_builders_fill_context() {
            let err = NatuError::parse_error("unexpected )")
                .with_formula("1 + )")
                .at_offset(4)
                .with_note("while parsing value");
            let ctx = err.context.unwrap();
            assert_eq!(ctx.formula.as_deref(), Some("1 + )"));
            assert_eq!(ctx.offset, Some(4));
            assert_eq!(ctx.notes, vec!["while parsing value".to_string()]);
        }

        #[test]
        fn test_fatal_errors() {
            assert_eq!(NatuError::duplicate_unit("GeV").severity, Severity::Fatal);
            assert_eq!(NatuError::unit_mismatch("add", 1, -1).severity, Severity::Error);
        }

        #[test]
        fn test_serialize_skips_empty_fields() {
            let err = NatuError::unsupported_operator("mod");
            let json = serde_json::to_value(&err).unwrap();
            assert_eq!(json["code"], "UNSUPPORTED_OPERATOR");
            assert_eq!(json["severity"], "error");
            assert!(json.get("context").is_none());
            assert!(json.get("suggestion").is_none());
        }
    }
}
