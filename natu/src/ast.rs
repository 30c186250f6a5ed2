//! Abstract Syntax Tree

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numeric literal as written
    Number(String),
    Symbol(String),
    /// Parenthesized sub-expression
    Paren(Box<Expr>),
    Binary(Box<Expr>, BinOp, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Call(String, Vec<Expr>),
    StringLiteral(String),
    /// List literal: [a, b, c]
    List(Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp { Add, Sub, Mul, Div, Pow, Mod }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp { Neg, Plus, Factorial }

impl Expr {
    /// Node kind used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Number(_) => "ConstantNode",
            Expr::Symbol(_) => "SymbolNode",
            Expr::Paren(_) => "ParenthesisNode",
            Expr::Binary(..) | Expr::Unary(..) => "OperatorNode",
            Expr::Call(..) => "FunctionNode",
            Expr::StringLiteral(_) => "StringNode",
            Expr::List(_) => "ArrayNode",
        }
    }

    pub fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary(op, Box::new(operand))
    }
}

impl BinOp {
    /// Operator function name (`add`, `pow`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "subtract",
            BinOp::Mul => "multiply",
            BinOp::Div => "divide",
            BinOp::Pow => "pow",
            BinOp::Mod => "mod",
        }
    }
}

impl UnaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "unaryMinus",
            UnaryOp::Plus => "unaryPlus",
            UnaryOp::Factorial => "factorial",
        }
    }
}
