//! natu Standard Library
//!
//! Scalar functions over dimensionless numbers. Each function stays on the
//! real `f64` path while its argument is real and in domain, and moves to
//! the complex plane otherwise (`log(-1)`, `asin(2)`).

pub mod functions;
mod helpers;

use natu_plugin::FunctionRegistry;

/// Load standard library into registry
pub fn load_standard_library(registry: FunctionRegistry) -> FunctionRegistry {
    registry
        // Core math
        .with_function(functions::Sqrt)
        .with_function(functions::Cbrt)
        .with_function(functions::Exp)
        .with_function(functions::Log)
        .with_function(functions::Log10)
        .with_function(functions::Log2)
        .with_function(functions::Pow)
        .with_function(functions::Abs)
        .with_function(functions::Round)
        .with_function(functions::Floor)
        .with_function(functions::Ceil)
        // Trigonometry
        .with_function(functions::Sin)
        .with_function(functions::Cos)
        .with_function(functions::Tan)
        .with_function(functions::Asin)
        .with_function(functions::Acos)
        .with_function(functions::Atan)
        .with_function(functions::Atan2)
        .with_function(functions::Sinh)
        .with_function(functions::Cosh)
        .with_function(functions::Tanh)
        // Complex parts
        .with_function(functions::Re)
        .with_function(functions::Im)
        .with_function(functions::Conj)
        .with_function(functions::Arg)
}

/// Create registry with standard library
pub fn standard_registry() -> FunctionRegistry {
    load_standard_library(FunctionRegistry::new())
}
