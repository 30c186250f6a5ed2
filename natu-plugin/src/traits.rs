//! Plugin traits

use natu_core::{NatuError, Number};
use serde::Serialize;

/// Metadata about a function argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ArgMeta {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self { name, description, optional: false, default: None }
    }

    pub const fn optional(name: &'static str, description: &'static str, default: &'static str) -> Self {
        Self { name, description, optional: true, default: Some(default) }
    }
}

/// Metadata for a function plugin
#[derive(Debug, Clone, Serialize)]
pub struct FunctionMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    pub examples: &'static [&'static str],
    pub category: &'static str,
    pub related: &'static [&'static str],
}

impl FunctionMeta {
    /// Check an argument count against the declared arguments
    pub fn check_arity(&self, got: usize) -> Result<(), NatuError> {
        let max = self.args.len();
        let min = self.args.iter().filter(|a| !a.optional).count();
        if got < min || got > max {
            return Err(NatuError::arg_count(self.name, if got < min { min } else { max }, got)
                .with_suggestion(format!("Usage: {}", self.usage)));
        }
        Ok(())
    }
}

/// Pure scalar function over dimensionless numbers
pub trait FunctionPlugin: Send + Sync {
    fn meta(&self) -> FunctionMeta;

    /// Implementations may be called directly, so they check their own
    /// arity with `FunctionMeta::check_arity` before reading `args`
    fn call(&self, args: &[Number]) -> Result<Number, NatuError>;
}
