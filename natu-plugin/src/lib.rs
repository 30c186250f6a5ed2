//! natu Plugin System
//!
//! Scalar functions (`sin`, `log`, ...) are plugins looked up by name.
//! The evaluator strips dimensions before calling them, so plugins only
//! ever see bare numbers.

mod traits;
mod registry;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::FunctionRegistry;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, FunctionRegistry};
    pub use natu_core::prelude::*;
}
