//! Process-wide unit registry
//!
//! Built once from the seed table on first use. Expression rows of the table
//! are evaluated by the same evaluator that serves user input, against the
//! rows loaded before them.

use std::sync::LazyLock;
use natu_core::NatuError;
use natu_plugin::FunctionRegistry;
use natu_units::{seed_table, RegistryBuilder, UnitDef, UnitRegistry};
use crate::eval::Evaluator;
use crate::parser::parse_expr;

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(|| {
    build_registry(&seed_table(), &natu_std::standard_registry())
        .expect("built-in unit table is consistent")
});

/// Build a registry from a table, in table order
pub fn build_registry(table: &[UnitDef], functions: &FunctionRegistry) -> Result<UnitRegistry, NatuError> {
    let builder = RegistryBuilder::new().load(table, |text, scope| {
        let expr = parse_expr(text)?;
        Evaluator::new(scope, functions).eval(&expr)
    })?;
    Ok(builder.build())
}
