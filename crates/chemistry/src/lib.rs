//! Aqueous solution chemistry for the phscale beaker simulation.
//!
//! - [`conversion`]: stateless conversions among pH, molar concentration,
//!   and molar quantity, plus the dilution rule used to mix a concentrate
//!   with water
//! - [`solute`]: the catalog of stock liquids and custom solutes
//! - [`Solution`]: the solute and solvent volumes in a beaker and the
//!   chemistry derived from them

pub mod conversion;
pub mod solute;

mod color;
mod solution;
mod species;

pub use color::Color;
pub use solute::{SoluteId, SoluteKind};
pub use solution::{Solution, SolutionSnapshot};
pub use species::Species;
