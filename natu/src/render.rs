//! Result formatting

use natu_core::Dimension;
use natu_units::Quantity;
use crate::ast::Expr;
use crate::parser::parse_expr;

/// Render a converted quantity against the name of its target unit.
///
/// `dimension` 0 prints the bare value, 1 prints `value name`, anything else
/// prints `value name^k` or `value name^(p/q)`. A name that is not a single
/// symbol is parenthesized first, so `GeV*s` squared reads `(GeV*s)^2`.
pub fn format_quantity(q: &Quantity, name: &str, precision: usize) -> String {
    let value = q.value.format(precision);
    let dimension = q.dimension;

    if dimension.is_dimensionless() {
        return value;
    }
    if dimension == Dimension::BASE {
        return format!("{} {}", value, name);
    }

    let name = if is_symbol(name) { name.to_string() } else { format!("({})", name) };
    if dimension.is_integer() {
        format!("{} {}^{}", value, name, dimension)
    } else {
        format!("{} {}^({})", value, name, dimension)
    }
}

fn is_symbol(name: &str) -> bool {
    matches!(parse_expr(name), Ok(Expr::Symbol(_)))
}
