//! Trigonometric and hyperbolic functions

use crate::helpers::{real_or_complex, require_real};
use natu_plugin::prelude::*;

pub struct Sin;
pub struct Cos;
pub struct Tan;
pub struct Asin;
pub struct Acos;
pub struct Atan;
pub struct Atan2;
pub struct Sinh;
pub struct Cosh;
pub struct Tanh;

static ANGLE_ARG: [ArgMeta; 1] = [ArgMeta::required("x", "Angle in radians")];
static VALUE_ARG: [ArgMeta; 1] = [ArgMeta::required("x", "Value")];

static ATAN2_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("y", "Ordinate"),
    ArgMeta::required("x", "Abscissa"),
];

static SIN_RELATED: [&str; 3] = ["cos", "tan", "asin"];
static COS_RELATED: [&str; 3] = ["sin", "tan", "acos"];
static TAN_RELATED: [&str; 3] = ["sin", "cos", "atan"];
static ATAN_RELATED: [&str; 2] = ["atan2", "tan"];
static HYPERBOLIC_RELATED: [&str; 3] = ["sinh", "cosh", "tanh"];

fn in_unit_interval(x: f64) -> bool {
    (-1.0..=1.0).contains(&x)
}

impl FunctionPlugin for Sin {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sin",
            description: "Sine function",
            usage: "sin(x)",
            args: &ANGLE_ARG,
            examples: &["sin(0)", "sin(pi/2)"],
            category: "trig",
            related: &SIN_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.sin()), |z| z.sin()))
    }
}

impl FunctionPlugin for Cos {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cos",
            description: "Cosine function",
            usage: "cos(x)",
            args: &ANGLE_ARG,
            examples: &["cos(0)", "cos(pi)"],
            category: "trig",
            related: &COS_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.cos()), |z| z.cos()))
    }
}

impl FunctionPlugin for Tan {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "tan",
            description: "Tangent function",
            usage: "tan(x)",
            args: &ANGLE_ARG,
            examples: &["tan(0)", "tan(pi/4)"],
            category: "trig",
            related: &TAN_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.tan()), |z| z.tan()))
    }
}

impl FunctionPlugin for Asin {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "asin",
            description: "Inverse sine; complex outside [-1, 1]",
            usage: "asin(x)",
            args: &VALUE_ARG,
            examples: &["asin(1)", "asin(2)"],
            category: "trig",
            related: &["sin", "acos"],
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| in_unit_interval(x).then(|| x.asin()), |z| z.asin()))
    }
}

impl FunctionPlugin for Acos {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "acos",
            description: "Inverse cosine; complex outside [-1, 1]",
            usage: "acos(x)",
            args: &VALUE_ARG,
            examples: &["acos(0)", "acos(-1)"],
            category: "trig",
            related: &["cos", "asin"],
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| in_unit_interval(x).then(|| x.acos()), |z| z.acos()))
    }
}

impl FunctionPlugin for Atan {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "atan",
            description: "Inverse tangent",
            usage: "atan(x)",
            args: &VALUE_ARG,
            examples: &["atan(1)"],
            category: "trig",
            related: &ATAN_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.atan()), |z| z.atan()))
    }
}

impl FunctionPlugin for Atan2 {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "atan2",
            description: "Angle of the point (x, y) from the positive x axis",
            usage: "atan2(y, x)",
            args: &ATAN2_ARGS,
            examples: &["atan2(1, 1)", "atan2(0, -1)"],
            category: "trig",
            related: &ATAN_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        let y = require_real("atan2", "y", &args[0])?;
        let x = require_real("atan2", "x", &args[1])?;
        Ok(Number::from_f64(y.atan2(x)))
    }
}

impl FunctionPlugin for Sinh {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sinh",
            description: "Hyperbolic sine",
            usage: "sinh(x)",
            args: &VALUE_ARG,
            examples: &["sinh(1)"],
            category: "trig",
            related: &HYPERBOLIC_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.sinh()), |z| z.sinh()))
    }
}

impl FunctionPlugin for Cosh {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cosh",
            description: "Hyperbolic cosine",
            usage: "cosh(x)",
            args: &VALUE_ARG,
            examples: &["cosh(0)"],
            category: "trig",
            related: &HYPERBOLIC_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.cosh()), |z| z.cosh()))
    }
}

impl FunctionPlugin for Tanh {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "tanh",
            description: "Hyperbolic tangent",
            usage: "tanh(x)",
            args: &VALUE_ARG,
            examples: &["tanh(1)"],
            category: "trig",
            related: &HYPERBOLIC_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(real_or_complex(&args[0], |x| Some(x.tanh()), |z| z.tanh()))
    }
}
