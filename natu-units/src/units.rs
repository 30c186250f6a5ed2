//! Unit table - bootstrap constants and derived natural units
//!
//! The table is loaded in order through `RegistryBuilder`. Derived entries
//! defined by an expression may only refer to names inserted before them,
//! so insertion order is dependency order. Once built, a `UnitRegistry`
//! is read-only.

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use serde::Serialize;
use natu_core::{NatuError, Number};
use crate::Quantity;

/// Name of the base unit (dimension 1)
pub const BASE_UNIT: &str = "GeV";

/// ħc in GeV·cm
pub const HBAR_C: f64 = 1.973269602e-14;

/// Speed of light in cm/s
pub const SPEED_OF_LIGHT: f64 = 2.99792458e10;

/// Bootstrap entries that are pure numbers rather than units
pub const MATH_CONSTANTS: [&str; 3] = ["i", "pi", "e"];

const HC: f64 = HBAR_C;
const C: f64 = SPEED_OF_LIGHT;

/// Electron mass in GeV
const M_ELECTRON: f64 = 0.510998902e-3;
/// Inverse fine structure constant
const ALPHA_INV: f64 = 137.03599976;
/// Bohr magneton in GeV per gauss
const BOHR_MAGNETON_GAUSS: f64 = 5.788381749e-18;
/// Bohr magneton in GeV per tesla
const BOHR_MAGNETON_TESLA: f64 = 5.788381749e-14;
/// Grams per GeV
const GRAM_PER_GEV: f64 = 1.782661731e-24;

/// Where a table entry's quantity comes from
#[derive(Debug, Clone)]
pub enum UnitSource {
    /// A fixed quantity
    Literal(Quantity),
    /// An expression over entries inserted earlier
    Expr(&'static str),
}

/// One row of the unit table
#[derive(Debug, Clone)]
pub struct UnitDef {
    pub name: &'static str,
    pub description: &'static str,
    pub source: UnitSource,
}

impl UnitDef {
    pub fn literal(name: &'static str, value: f64, dimension: i64, description: &'static str) -> Self {
        UnitDef { name, description, source: UnitSource::Literal(Quantity::from_f64(value, dimension)) }
    }

    pub fn constant(name: &'static str, value: Number, description: &'static str) -> Self {
        UnitDef { name, description, source: UnitSource::Literal(Quantity::dimensionless(value)) }
    }

    pub fn expr(name: &'static str, expr: &'static str, description: &'static str) -> Self {
        UnitDef { name, description, source: UnitSource::Expr(expr) }
    }
}

/// The built-in unit table in dependency order
pub fn seed_table() -> Vec<UnitDef> {
    let field = ALPHA_INV.sqrt() * 2.0 * M_ELECTRON;

    vec![
        // Bootstrap
        UnitDef::constant("i", Number::I, "imaginary unit"),
        UnitDef::constant("pi", Number::from_f64(PI), "ratio of circumference to diameter"),
        UnitDef::constant("e", Number::from_f64(E), "Euler's number"),
        UnitDef::literal(BASE_UNIT, 1.0, 1, "gigaelectronvolt (base unit)"),

        // Energy
        UnitDef::expr("MeV", "1e-3 GeV", "megaelectronvolt"),
        UnitDef::literal("keV", 1e-6, 1, "kiloelectronvolt"),
        UnitDef::literal("eV", 1e-9, 1, "electronvolt"),

        // Length and time
        UnitDef::literal("cm", 1.0 / HC, -1, "centimeter"),
        UnitDef::literal("km", 1e5 / HC, -1, "kilometer"),
        UnitDef::literal("pc", 3.0856775807e18 / HC, -1, "parsec"),
        UnitDef::literal("Mpc", 3.0856775807e24 / HC, -1, "megaparsec"),
        UnitDef::literal("s", C / HC, -1, "second"),
        UnitDef::literal("yr", 3600.0 * 24.0 * 365.0 * C / HC, -1, "year (365 days)"),

        // Mass
        UnitDef::literal("Mpl", 1.221e19, 1, "Planck mass"),
        UnitDef::literal("g", 1.0 / GRAM_PER_GEV, 1, "gram"),
        UnitDef::literal("kg", 1.0 / 1.782661731e-27, 1, "kilogram"),
        UnitDef::literal("Msun", 1.9889e57 / 1.782661731, 1, "solar mass"),

        // Temperature and field strength
        UnitDef::literal("K", 1e-9 / (300.0 * 38.681686), 1, "kelvin"),
        UnitDef::literal("G", field * BOHR_MAGNETON_GAUSS, 2, "gauss"),

        UnitDef::literal("m", 100.0 / HC, -1, "meter"),
        UnitDef::literal("m_e", M_ELECTRON, 1, "electron mass"),
        UnitDef::literal("m_p", 0.938271998, 1, "proton mass"),

        // Frequency
        UnitDef::literal("Hz", 2.0 * PI * HC / C, 1, "hertz"),
        UnitDef::literal("kHz", 2.0 * PI * 1e3 * HC / C, 1, "kilohertz"),
        UnitDef::literal("MHz", 2.0 * PI * 1e6 * HC / C, 1, "megahertz"),
        UnitDef::literal("GHz", 2.0 * PI * 1e9 * HC / C, 1, "gigahertz"),

        // Cross sections and flux
        UnitDef::literal("barn", 1e-24 / (HC * HC), -2, "barn"),
        UnitDef::literal("sigmat", 0.665245854e-24 / (HC * HC), -2, "Thomson cross section"),
        UnitDef::literal("Jy", 2.4303146457e-48, 3, "jansky"),

        // Energy and power
        UnitDef::literal("erg", 6.2415097419e2, 1, "erg"),
        UnitDef::literal("J", 6.2415097419e9, 1, "joule"),
        UnitDef::literal("W", 4.1082359198e-15, 2, "watt"),
        UnitDef::literal("T", field * BOHR_MAGNETON_TESLA, 2, "tesla"),

        UnitDef::literal("kpc", 3.0856775807e21 / HC, -1, "kiloparsec"),
        UnitDef::literal("m_w", 80.419, 1, "W boson mass"),
        UnitDef::literal("m_z", 91.1882, 1, "Z boson mass"),
        UnitDef::literal("AU", 1.4959787066e13 / HC, -1, "astronomical unit"),

        // Astrophysics
        UnitDef::literal("sigmaB", 0.164493406684823, 0, "Stefan-Boltzmann constant"),
        UnitDef::literal("Rsun", 3.5245840699e24, -1, "solar radius"),
        UnitDef::literal("Lsun", 1.5771517696e12, 2, "solar luminosity"),
    ]
}

/// A registered unit
#[derive(Debug, Clone, Serialize)]
pub struct UnitEntry {
    pub name: String,
    pub description: String,
    pub quantity: Quantity,
}

/// Read access to unit names
pub trait UnitScope {
    fn lookup(&self, name: &str) -> Option<&Quantity>;
}

/// Ordered table under construction
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<UnitEntry>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit; names are unique
    pub fn insert(&mut self, name: &str, quantity: Quantity, description: &str) -> Result<(), NatuError> {
        if self.index.contains_key(name) {
            return Err(NatuError::duplicate_unit(name));
        }
        tracing::trace!(unit = name, dimension = %quantity.dimension, "registered unit");
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(UnitEntry {
            name: name.to_string(),
            description: description.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Insert one table row, evaluating expression rows against the entries
    /// inserted so far
    pub fn define<F>(&mut self, def: &UnitDef, eval: F) -> Result<(), NatuError>
    where
        F: FnOnce(&str, &dyn UnitScope) -> Result<Quantity, NatuError>,
    {
        let quantity = match &def.source {
            UnitSource::Literal(q) => *q,
            UnitSource::Expr(text) => eval(text, &*self)
                .map_err(|e| NatuError::unit_dependency(def.name, &e).with_formula(*text))?,
        };
        self.insert(def.name, quantity, def.description)
    }

    /// Load a whole table in order
    pub fn load<F>(mut self, table: &[UnitDef], eval: F) -> Result<Self, NatuError>
    where
        F: Fn(&str, &dyn UnitScope) -> Result<Quantity, NatuError>,
    {
        for def in table {
            self.define(def, &eval)?;
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the table
    pub fn build(self) -> UnitRegistry {
        tracing::debug!(units = self.entries.len(), "unit registry built");
        UnitRegistry { entries: self.entries, index: self.index }
    }
}

impl UnitScope for RegistryBuilder {
    fn lookup(&self, name: &str) -> Option<&Quantity> {
        self.index.get(name).map(|&i| &self.entries[i].quantity)
    }
}

/// Frozen, insertion-ordered unit table
#[derive(Debug)]
pub struct UnitRegistry {
    entries: Vec<UnitEntry>,
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.entry(name).map(|e| &e.quantity)
    }

    pub fn entry(&self, name: &str) -> Option<&UnitEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[UnitEntry] {
        &self.entries
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl UnitScope for UnitRegistry {
    fn lookup(&self, name: &str) -> Option<&Quantity> {
        self.get(name)
    }
}
