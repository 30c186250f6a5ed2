//! natu Units - Quantities in natural units
//!
//! Every quantity is a number times a rational power of one base unit,
//! `GeV`. Lengths and times carry negative powers (`cm`, `s` are GeV^-1),
//! masses and energies carry the first power, cross sections the minus
//! second, and so on.
//!
//! - `Quantity`: value + dimension, with the dimension-checked algebra
//! - `UnitRegistry`: the frozen, insertion-ordered unit table
//! - `RegistryBuilder`: dependency-ordered construction of that table
//! - `convert` / `restore`: re-expressing a quantity in a target unit

mod quantity;
mod units;
mod convert;

pub use quantity::Quantity;
pub use units::{
    seed_table, RegistryBuilder, UnitDef, UnitEntry, UnitRegistry, UnitScope, UnitSource,
    BASE_UNIT, HBAR_C, MATH_CONSTANTS, SPEED_OF_LIGHT,
};
pub use convert::{convert, restore};
