//! Complex number parts

use natu_plugin::prelude::*;

pub struct Re;
pub struct Im;
pub struct Conj;
pub struct Arg;

static Z_ARG: [ArgMeta; 1] = [ArgMeta::required("z", "Complex value")];
static PARTS_RELATED: [&str; 4] = ["re", "im", "conj", "arg"];

impl FunctionPlugin for Re {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "re",
            description: "Real part",
            usage: "re(z)",
            args: &Z_ARG,
            examples: &["re(3 + 4i)"],
            category: "complex",
            related: &PARTS_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(Number::from_f64(args[0].re()))
    }
}

impl FunctionPlugin for Im {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "im",
            description: "Imaginary part",
            usage: "im(z)",
            args: &Z_ARG,
            examples: &["im(3 + 4i)"],
            category: "complex",
            related: &PARTS_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(Number::from_f64(args[0].im()))
    }
}

impl FunctionPlugin for Conj {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "conj",
            description: "Complex conjugate",
            usage: "conj(z)",
            args: &Z_ARG,
            examples: &["conj(3 + 4i)"],
            category: "complex",
            related: &PARTS_RELATED,
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(Number::from(args[0].as_complex().conj()))
    }
}

impl FunctionPlugin for Arg {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "arg",
            description: "Argument (phase angle) in radians",
            usage: "arg(z)",
            args: &Z_ARG,
            examples: &["arg(i)", "arg(-1)"],
            category: "complex",
            related: &["atan2", "abs"],
        }
    }

    fn call(&self, args: &[Number]) -> Result<Number, NatuError> {
        self.meta().check_arity(args.len())?;
        Ok(Number::from_f64(args[0].as_complex().arg()))
    }
}
