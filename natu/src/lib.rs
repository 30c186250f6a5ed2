//! natu - Natural-units calculator engine
//!
//! Evaluates expressions such as `3 GeV + 2 MeV` or `1.5 kg / (2 cm)^3`
//! where every quantity is a number times a rational power of `GeV`, and
//! re-expresses results in any target unit expression.
//!
//! ```no_run
//! use natu::Natu;
//!
//! let natu = Natu::default();
//! assert_eq!(natu.convert_and_format("1 GeV", "MeV"), "1000 MeV");
//! ```

mod ast;
mod parser;
mod eval;
mod registry;
mod render;

pub use ast::{BinOp, Expr, UnaryOp};
pub use parser::parse_expr;
pub use eval::Evaluator;
pub use registry::{build_registry, UNITS};
pub use render::format_quantity;

pub use natu_core::{Dimension, NatuError, Number, DEFAULT_PRECISION};
pub use natu_units::{Quantity, UnitEntry, UnitRegistry, BASE_UNIT};

use natu_plugin::{FunctionMeta, FunctionRegistry};
use natu_units::MATH_CONSTANTS;
use serde::Serialize;
use std::sync::Arc;

/// Highest meaningful number of significant digits for `f64`
pub const MAX_PRECISION: usize = 17;

/// Outcome of a successful conversion
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// The evaluated value expression
    pub value: Quantity,
    /// The evaluated target unit expression
    pub target: Quantity,
    /// `value` expressed as a power of `target`
    pub converted: Quantity,
    /// Target unit as written
    pub unit: String,
    /// Display string, e.g. `1000 MeV`
    pub formatted: String,
}

/// Main natu engine
#[derive(Clone)]
pub struct Natu {
    functions: Arc<FunctionRegistry>,
    precision: usize,
}

impl Natu {
    pub fn new(functions: FunctionRegistry) -> Self {
        Self {
            functions: Arc::new(functions),
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(natu_std::standard_registry())
    }

    /// Significant digits in formatted results, clamped to 1..=17
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.clamp(1, MAX_PRECISION);
        self
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn units(&self) -> &'static UnitRegistry {
        &UNITS
    }

    /// Parse and evaluate an expression
    pub fn evaluate_expression(&self, text: &str) -> Result<Quantity, NatuError> {
        let expr = parse_expr(text)?;
        Evaluator::new(&*UNITS, &self.functions)
            .eval(&expr)
            .map_err(|e| e.with_formula(text))
            .inspect_err(|e| tracing::debug!(expression = text, code = %e.code, "evaluation failed"))
    }

    /// Evaluate `value_text` and express it in the unit `unit_text`
    pub fn convert(&self, value_text: &str, unit_text: &str) -> Result<Conversion, NatuError> {
        let value = self.evaluate_expression(value_text)?;
        let target = self.evaluate_expression(unit_text)?;
        let converted = natu_units::convert(&value, &target)
            .map_err(|e| e.with_note(format!("converting {} to {}", value_text, unit_text)))?;

        let unit = unit_text.trim().to_string();
        let formatted = format_quantity(&converted, &unit, self.precision);
        tracing::debug!(value = value_text, unit = %unit, result = %formatted, "converted");
        Ok(Conversion { value, target, converted, unit, formatted })
    }

    /// Like `convert`, but failures become `Error: <message>`
    pub fn convert_and_format(&self, value_text: &str, unit_text: &str) -> String {
        match self.convert(value_text, unit_text) {
            Ok(conversion) => conversion.formatted,
            Err(e) => format!("Error: {}", e.message),
        }
    }

    /// Unit names offered to users, in table order, without the bare
    /// math constants
    pub fn unit_names(&self) -> Vec<&'static str> {
        UNITS.names()
            .filter(|name| !MATH_CONSTANTS.contains(name))
            .collect()
    }

    pub fn list_functions(&self, category: Option<&str>) -> Vec<FunctionMeta> {
        self.functions.list_functions(category)
    }
}

impl Default for Natu {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natu_core::codes;

    fn natu() -> Natu {
        Natu::with_standard_library()
    }

    #[test]
    fn test_evaluate_expression() {
        let q = natu().evaluate_expression("2 GeV + 3 GeV").unwrap();
        assert_eq!(q, Quantity::from_f64(5.0, 1));
    }

    #[test]
    fn test_errors_carry_formula() {
        let err = natu().evaluate_expression("1 GeV + 1 s").unwrap_err();
        assert_eq!(err.context.unwrap().formula.as_deref(), Some("1 GeV + 1 s"));
    }

    #[test]
    fn test_convert_and_format() {
        assert_eq!(natu().convert_and_format("1 GeV", "MeV"), "1000 MeV");
    }

    #[test]
    fn test_convert_and_format_error() {
        assert_eq!(natu().convert_and_format("1 GeV", "pi"), "Error: Can not convert to dimensionless (value is GeV^1)");
        assert!(natu().convert_and_format("1 +", "GeV").starts_with("Error: Parse error"));
    }

    #[test]
    fn test_deep_nesting_is_an_error_string() {
        let deep = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(natu().convert_and_format(&deep, "GeV").starts_with("Error: Parse error: Expression too long"));

        let signs = format!("{}1 GeV", "-".repeat(200));
        assert_eq!(
            natu().convert_and_format(&signs, "GeV"),
            "Error: Parse error: Expression nested too deeply"
        );
    }

    #[test]
    fn test_convert_keeps_parts() {
        let conversion = natu().convert("2 GeV", " MeV ").unwrap();
        assert_eq!(conversion.unit, "MeV");
        assert_eq!(conversion.value, Quantity::from_f64(2.0, 1));
        assert_eq!(conversion.formatted, "2000 MeV");
    }

    #[test]
    fn test_conversion_serializes() {
        let conversion = natu().convert("2 GeV", "GeV").unwrap();
        let json = serde_json::to_value(&conversion).unwrap();
        assert_eq!(json["unit"], "GeV");
        assert_eq!(json["formatted"], "2 GeV");
        assert_eq!(json["converted"]["value"], "2");
        assert_eq!(json["converted"]["dimension"], json["value"]["dimension"]);
    }

    #[test]
    fn test_conversion_note() {
        let err = natu().convert("1 GeV", "2").unwrap_err();
        assert!(err.is(codes::CANNOT_CONVERT_TO_DIMENSIONLESS));
        assert_eq!(err.context.unwrap().notes, vec!["converting 1 GeV to 2".to_string()]);
    }

    #[test]
    fn test_precision() {
        let natu = natu().with_precision(3);
        assert_eq!(natu.convert_and_format("1/3 GeV", "GeV"), "0.333 GeV");
        assert_eq!(Natu::default().with_precision(0).precision(), 1);
        assert_eq!(Natu::default().with_precision(40).precision(), MAX_PRECISION);
    }

    #[test]
    fn test_unit_names_hide_constants() {
        let names = natu().unit_names();
        assert_eq!(names[0], "GeV");
        assert!(!names.contains(&"pi"));
        assert!(!names.contains(&"i"));
        assert!(names.contains(&"Lsun"));
        assert_eq!(names.len(), UNITS.len() - 3);
    }

    #[test]
    fn test_custom_function_registry() {
        let natu = Natu::new(FunctionRegistry::new());
        let err = natu.evaluate_expression("sin(0)").unwrap_err();
        assert!(err.is(codes::UNKNOWN_FUNCTION));
        assert!(natu.evaluate_expression("sqrt(4)").is_ok());
    }
}
