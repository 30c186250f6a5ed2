//! Core math functions

use crate::helpers::{per_part, real_or_complex, require_digits};
use natu_plugin::prelude::*;

pub struct Sqrt;
pub struct Cbrt;
pub struct Exp;
pub struct Log;
pub struct Log10;
pub struct Log2;
pub struct Pow;
pub struct Abs;
pub struct Round;
pub struct Floor;
pub struct Ceil;

static X_ARG: [ArgMeta; 1] = [ArgMeta::required("x", "Value")];

static SQRT_EXAMPLES: [&str; 2] = ["sqrt(2)", "sqrt(-4)"];
static SQRT_RELATED: [&str; 2] = ["cbrt", "pow"];

static CBRT_EXAMPLES: [&str; 2] = ["cbrt(27)", "cbrt(-8)"];
static CBRT_RELATED: [&str; 2] = ["sqrt", "pow"];

static EXP_EXAMPLES: [&str; 2] = ["exp(1)", "exp(pi i)"];
static EXP_RELATED: [&str; 2] = ["log", "pow"];

static LOG_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Value"),
    ArgMeta::optional("base", "Logarithm base", "e"),
];
static LOG_EXAMPLES: [&str; 3] = ["log(e)", "log(8, 2)", "log(-1)"];
static LOG_RELATED: [&str; 3] = ["log10", "log2", "exp"];

static LOG10_EXAMPLES: [&str; 1] = ["log10(1000)"];
static LOG10_RELATED: [&str; 2] = ["log", "log2"];

static LOG2_EXAMPLES: [&str; 1] = ["log2(1024)"];
static LOG2_RELATED: [&str; 2] = ["log", "log10"];

static POW_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("base", "Base value"),
    ArgMeta::required("exponent", "Exponent"),
];
static POW_EXAMPLES: [&str; 2] = ["pow(2, 10)", "pow(-8, 1/3)"];
static POW_RELATED: [&str; 2] = ["sqrt", "exp"];

static ABS_EXAMPLES: [&str; 2] = ["abs(-5)", "abs(3 + 4i)"];

static ROUND_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Value to round"),
    ArgMeta::optional("n", "Decimal places", "0"),
];
static ROUND_EXAMPLES: [&str; 2] = ["round(3.5)", "round(pi, 3)"];
static ROUND_RELATED: [&str; 2] = ["floor", "ceil"];

static FLOOR_EXAMPLES: [&str; 2] = ["floor(3.7)", "floor(-2.3)"];
static FLOOR_RELATED: [&str; 2] = ["ceil", "round"];

static CEIL_EXAMPLES: [&str; 2] = ["ceil(3.2)", "ceil(-2.7)"];
static CEIL_RELATED: [&str; 2] = ["floor", "round"];

impl FunctionPlugin for Sqrt {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sqrt",
            description: "Principal square root; negative values give an imaginary result",
            usage: "sqrt(x)",
            args: &X_ARG,
            examples: &SQRT_EXAMPLES,
            category: "math",
            related: &SQRT_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(args[0].sqrt())
    }
}

impl FunctionPlugin for Cbrt {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cbrt",
            description: "Cube root; real for every real argument",
            usage: "cbrt(x)",
            args: &X_ARG,
            examples: &CBRT_EXAMPLES,
            category: "math",
            related: &CBRT_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.cbrt()), |z| z.cbrt()))
    }
}

impl FunctionPlugin for Exp {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "exp",
            description: "Exponential function (e^x)",
            usage: "exp(x)",
            args: &X_ARG,
            examples: &EXP_EXAMPLES,
            category: "math",
            related: &EXP_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.exp()), |z| z.exp()))
    }
}

fn ln(x: &Number) -> Number {
    real_or_complex(x, |x| (x >= 0.0).then(|| x.ln()), |z| z.ln())
}

impl FunctionPlugin for Log {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "log",
            description: "Natural logarithm, or logarithm to the given base",
            usage: "log(x, base)",
            args: &LOG_ARGS,
            examples: &LOG_EXAMPLES,
            category: "math",
            related: &LOG_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        match args.get(1) {
            Some(base) => Ok(ln(&args[0]).div(&ln(base))),
            None => Ok(ln(&args[0])),
        }
    }
}

impl FunctionPlugin for Log10 {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "log10",
            description: "Base-10 logarithm",
            usage: "log10(x)",
            args: &X_ARG,
            examples: &LOG10_EXAMPLES,
            category: "math",
            related: &LOG10_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| (x >= 0.0).then(|| x.log10()), |z| z.ln() / 10f64.ln()))
    }
}

impl FunctionPlugin for Log2 {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "log2",
            description: "Base-2 logarithm",
            usage: "log2(x)",
            args: &X_ARG,
            examples: &LOG2_EXAMPLES,
            category: "math",
            related: &LOG2_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| (x >= 0.0).then(|| x.log2()), |z| z.ln() / std::f64::consts::LN_2))
    }
}

impl FunctionPlugin for Pow {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "pow",
            description: "Raise a number to a power (principal value)",
            usage: "pow(base, exponent)",
            args: &POW_ARGS,
            examples: &POW_EXAMPLES,
            category: "math",
            related: &POW_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(args[0].pow(&args[1]))
    }
}

impl FunctionPlugin for Abs {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "abs",
            description: "Absolute value (modulus for complex numbers)",
            usage: "abs(x)",
            args: &X_ARG,
            examples: &ABS_EXAMPLES,
            category: "math",
            related: &[],
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(args[0].abs())
    }
}

impl FunctionPlugin for Round {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "round",
            description: "Round half away from zero to n decimal places",
            usage: "round(x, n)",
            args: &ROUND_ARGS,
            examples: &ROUND_EXAMPLES,
            category: "math",
            related: &ROUND_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        let digits = match args.get(1) {
            Some(n) => require_digits("round", n)?,
            None => 0,
        };
        let scale = 10f64.powi(digits);
        Ok(per_part(&args[0], |x| (x * scale).round() / scale))
    }
}

impl FunctionPlugin for Floor {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "floor",
            description: "Round toward negative infinity",
            usage: "floor(x)",
            args: &X_ARG,
            examples: &FLOOR_EXAMPLES,
            category: "math",
            related: &FLOOR_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(per_part(&args[0], f64::floor))
    }
}

impl FunctionPlugin for Ceil {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "ceil",
            description: "Round toward positive infinity",
            usage: "ceil(x)",
            args: &X_ARG,
            examples: &CEIL_EXAMPLES,
            category: "math",
            related: &CEIL_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(per_part(&args[0], f64::ceil))
    }
}
