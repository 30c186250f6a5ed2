//! Structured errors
//!
//! Every failure is reported to the caller as a value with a
//! machine-readable code. A failed evaluation never poisons shared state.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_MISMATCH: &str = "UNIT_MISMATCH";
    pub const DIMENSIONFUL_EXPONENT: &str = "DIMENSIONFUL_EXPONENT";
    pub const DIMENSIONAL_FUNCTION_ARG: &str = "DIMENSIONAL_FUNCTION_ARG";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_FUNCTION: &str = "UNKNOWN_FUNCTION";
    pub const UNSUPPORTED_OPERATOR: &str = "UNSUPPORTED_OPERATOR";
    pub const UNSUPPORTED_NODE: &str = "UNSUPPORTED_NODE";
    pub const CANNOT_CONVERT_TO_DIMENSIONLESS: &str = "CANNOT_CONVERT_TO_DIMENSIONLESS";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const DUPLICATE_UNIT: &str = "DUPLICATE_UNIT";
    pub const UNIT_DEPENDENCY: &str = "UNIT_DEPENDENCY";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The current computation failed
    Error,
    /// The engine cannot be used (e.g. the unit table is inconsistent)
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Expression text that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Byte offset into the expression text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatuError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl NatuError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set formula context
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.formula = Some(formula.into());
        self
    }

    /// Builder: set offset context
    pub fn at_offset(mut self, offset: usize) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.offset = Some(offset);
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Dimensional Errors ==========

    pub fn unit_mismatch(op: &str, left: impl std::fmt::Display, right: impl std::fmt::Display) -> Self {
        Self::new(codes::UNIT_MISMATCH,
            format!("{}: unit mismatch (GeV^{} vs GeV^{})", op, left, right))
            .with_suggestion("Both operands must carry the same power of GeV")
    }

    pub fn dimensionful_exponent(dimension: impl std::fmt::Display) -> Self {
        Self::new(codes::DIMENSIONFUL_EXPONENT,
            format!("Dimensionful exponent (GeV^{})", dimension))
            .with_suggestion("Exponents must be pure numbers")
    }

    pub fn dimensional_function_arg(func: &str, dimension: impl std::fmt::Display) -> Self {
        Self::new(codes::DIMENSIONAL_FUNCTION_ARG,
            format!("Dimensional function arg: {}() got GeV^{}", func, dimension))
            .with_suggestion(format!("Divide the argument of {}() by a unit to make it dimensionless", func))
    }

    pub fn unknown_unit(name: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", name))
            .with_suggestion("Use list_units to see the available units")
    }

    pub fn unknown_function(name: &str) -> Self {
        Self::new(codes::UNKNOWN_FUNCTION, format!("Unknown function: {}", name))
            .with_suggestion("Use list_functions to see the available functions")
    }

    pub fn unsupported_operator(op: &str) -> Self {
        Self::new(codes::UNSUPPORTED_OPERATOR, format!("operator {} not implemented", op))
    }

    pub fn unsupported_node(kind: &str) -> Self {
        Self::new(codes::UNSUPPORTED_NODE, format!("eval: {} not implemented", kind))
    }

    pub fn nested_too_deeply(limit: usize) -> Self {
        Self::new(codes::UNSUPPORTED_NODE, format!("eval: expression nested deeper than {} levels", limit))
    }

    pub fn cannot_convert_to_dimensionless(dimension: impl std::fmt::Display) -> Self {
        Self::new(codes::CANNOT_CONVERT_TO_DIMENSIONLESS,
            format!("Can not convert to dimensionless (value is GeV^{})", dimension))
            .with_suggestion("Pick a target unit that carries a power of GeV")
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Check expression syntax")
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn duplicate_unit(name: &str) -> Self {
        Self::new(codes::DUPLICATE_UNIT, format!("Unit already defined: {}", name))
            .with_severity(Severity::Fatal)
    }

    pub fn unit_dependency(name: &str, cause: &NatuError) -> Self {
        Self::new(codes::UNIT_DEPENDENCY,
            format!("Unit {} cannot be derived: {}", name, cause.message))
            .with_suggestion("Derived units may only reference units defined before them")
            .with_severity(Severity::Fatal)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for NatuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for NatuError {}

impl From<NumberError> for NatuError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::parse_error(format!("invalid number {}", s)),
            NumberError::DivisionByZero => Self::domain_error("division by zero"),
            NumberError::DomainError(s) => Self::domain_error(s),
            NumberError::Overflow => Self::new(codes::OVERFLOW, "Numeric overflow")
                .with_suggestion("Dimension exponents must fit in 64-bit fractions"),
        }
    }
}
