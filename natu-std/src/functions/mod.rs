//! Standard scalar functions

mod math;
mod trig;
mod complex;

pub use math::{Sqrt, Cbrt, Exp, Log, Log10, Log2, Pow, Abs, Round, Floor, Ceil};
pub use trig::{Sin, Cos, Tan, Asin, Acos, Atan, Atan2, Sinh, Cosh, Tanh};
pub use complex::{Re, Im, Conj, Arg};
