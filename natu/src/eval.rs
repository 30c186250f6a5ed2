//! Expression evaluator
//!
//! Walks an `Expr` and produces a `Quantity`. Symbols resolve through a
//! `UnitScope`; named functions other than `sqrt` go through the injected
//! `FunctionRegistry` after their arguments are checked to be dimensionless.
//! The tree is never modified.

use crate::ast::{BinOp, Expr, UnaryOp};
use natu_core::{NatuError, Number};
use natu_plugin::FunctionRegistry;
use natu_units::{Quantity, UnitScope};

/// Deepest expression tree the evaluator walks
pub const MAX_DEPTH: usize = 600;

/// Evaluator over a unit scope and a scalar function table
pub struct Evaluator<'a> {
    units: &'a dyn UnitScope,
    functions: &'a FunctionRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(units: &'a dyn UnitScope, functions: &'a FunctionRegistry) -> Self {
        Self { units, functions }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Quantity, NatuError> {
        self.eval_at(expr, 0)
    }

    fn eval_at(&self, expr: &Expr, depth: usize) -> Result<Quantity, NatuError> {
        if depth >= MAX_DEPTH {
            return Err(NatuError::nested_too_deeply(MAX_DEPTH));
        }
        let next = depth + 1;
        match expr {
            Expr::Number(text) => {
                let value = Number::from_str(text)?;
                Ok(Quantity::dimensionless(value))
            }

            Expr::Symbol(name) => self.units
                .lookup(name)
                .copied()
                .ok_or_else(|| NatuError::unknown_unit(name)),

            Expr::Paren(inner) => self.eval_at(inner, next),

            Expr::Binary(lhs, op, rhs) => {
                let apply: fn(&Quantity, &Quantity) -> Result<Quantity, NatuError> = match op {
                    BinOp::Add => Quantity::add,
                    BinOp::Sub => Quantity::sub,
                    BinOp::Mul => Quantity::mul,
                    BinOp::Div => Quantity::div,
                    BinOp::Pow => Quantity::pow,
                    BinOp::Mod => return Err(NatuError::unsupported_operator(op.name())),
                };
                apply(&self.eval_at(lhs, next)?, &self.eval_at(rhs, next)?)
            }

            Expr::Unary(op, operand) => match op {
                UnaryOp::Neg => Ok(self.eval_at(operand, next)?.neg()),
                UnaryOp::Plus => self.eval_at(operand, next),
                UnaryOp::Factorial => Err(NatuError::unsupported_operator(op.name())),
            },

            Expr::Call(name, args) => self.eval_call(name, args, next),

            Expr::StringLiteral(_) | Expr::List(_) => Err(NatuError::unsupported_node(expr.kind())),
        }
    }

    fn eval_call(&self, name: &str, args: &[Expr], depth: usize) -> Result<Quantity, NatuError> {
        if name == "sqrt" {
            if args.len() != 1 {
                return Err(NatuError::arg_count("sqrt", 1, args.len()));
            }
            return self.eval_at(&args[0], depth)?.sqrt();
        }

        let values = args.iter()
            .map(|arg| self.eval_at(arg, depth))
            .collect::<Result<Vec<_>, _>>()?;
        Quantity::apply(name, &values, self.functions)
    }
}
