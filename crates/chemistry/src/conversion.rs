//! Conversions among pH, molar concentration, and molar quantity.
//!
//! All functions assume aqueous solutions at 25 °C, where
//!
//! ```text
//! [H3O+] · [OH-] = Kw = 1e-14 (mol/L)²
//! pH  = −log10([H3O+])
//! pOH = −log10([OH-]) = 14 − pH
//! ```
//!
//! The functions are total on their mathematical domain and do not guard
//! against empty volumes or non-positive concentrations.
//! An empty beaker has no pH at all, so callers such as [`Solution`] return
//! `None` before reaching these conversions.
//!
//! [`Solution`]: crate::Solution

use uom::si::{
    amount_of_substance::mole,
    f64::{AmountOfSubstance, MolarConcentration, Volume},
    molar_concentration::mole_per_liter,
};

use crate::Species;

/// The pH of pure water.
pub const NEUTRAL_PH: f64 = 7.0;

/// The negative base-10 logarithm of the water autoionization constant, `pKw`.
pub const PKW: f64 = 14.0;

/// Molarity of pure water in mol/L.
///
/// Dissolved solute does not perturb water's concentration at the scale
/// modeled here, so this value is used for every pH.
pub const WATER_MOLARITY: f64 = 55.6;

/// Avogadro's number in 1/mol.
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Returns `[H3O+] = 10^(−pH)`.
#[must_use]
pub fn ph_to_concentration_h3o(ph: f64) -> MolarConcentration {
    MolarConcentration::new::<mole_per_liter>(10f64.powf(-ph))
}

/// Returns `[OH-] = 10^(pH − 14)`.
#[must_use]
pub fn ph_to_concentration_oh(ph: f64) -> MolarConcentration {
    MolarConcentration::new::<mole_per_liter>(10f64.powf(ph - PKW))
}

/// Returns `[H2O]`, which is the constant [`WATER_MOLARITY`].
#[must_use]
pub fn ph_to_concentration_h2o(_ph: f64) -> MolarConcentration {
    MolarConcentration::new::<mole_per_liter>(WATER_MOLARITY)
}

/// Returns the concentration of `species` in a solution at `ph`.
#[must_use]
pub fn ph_to_concentration(species: Species, ph: f64) -> MolarConcentration {
    match species {
        Species::H3O => ph_to_concentration_h3o(ph),
        Species::OH => ph_to_concentration_oh(ph),
        Species::H2O => ph_to_concentration_h2o(ph),
    }
}

/// Returns the moles of `species` in `volume` of solution at `ph`.
#[must_use]
pub fn ph_to_moles(species: Species, ph: f64, volume: Volume) -> AmountOfSubstance {
    ph_to_concentration(species, ph) * volume
}

/// Returns `pH = −log10([H3O+])`.
#[must_use]
pub fn concentration_h3o_to_ph(concentration: MolarConcentration) -> f64 {
    -concentration.get::<mole_per_liter>().log10()
}

/// Returns `pH = 14 + log10([OH-])`.
#[must_use]
pub fn concentration_oh_to_ph(concentration: MolarConcentration) -> f64 {
    PKW + concentration.get::<mole_per_liter>().log10()
}

/// Returns the pH of `moles` of H3O+ dissolved in `volume`.
#[must_use]
pub fn moles_h3o_to_ph(moles: AmountOfSubstance, volume: Volume) -> f64 {
    concentration_h3o_to_ph((moles / volume).into())
}

/// Returns the pH of `moles` of OH- dissolved in `volume`.
#[must_use]
pub fn moles_oh_to_ph(moles: AmountOfSubstance, volume: Volume) -> f64 {
    concentration_oh_to_ph((moles / volume).into())
}

/// Returns the number of molecules in `moles`.
#[must_use]
pub fn moles_to_molecules(moles: AmountOfSubstance) -> f64 {
    moles.get::<mole>() * AVOGADRO
}

/// Returns the pH after diluting a concentrate with neutral water.
///
/// The concentrate contributes an excess of H3O+ (acids) or OH- (bases)
/// over the neutral baseline of `1e-7` mol/L.
/// That excess is diluted across the combined volume and recombined with
/// the baseline before converting back to pH:
///
/// ```text
/// excess   = [X]_solute − [X]_neutral
/// [X]_mix  = [X]_neutral + excess · V_solute / (V_solute + V_solvent)
/// ```
///
/// where `X` is H3O+ when `solute_ph < 7` and OH- when `solute_ph > 7`.
///
/// The boundaries are exact: with no solvent the result is `solute_ph`
/// itself, and with no solute (or a neutral solute) the result is exactly 7.
/// Between them the result moves monotonically toward 7 as solvent is added
/// and never crosses it.
///
/// Returns `None` if both volumes are zero.
#[must_use]
pub fn mixed_ph(solute_ph: f64, solute_volume: Volume, solvent_volume: Volume) -> Option<f64> {
    let total = solute_volume + solvent_volume;
    if total.value <= 0.0 {
        return None;
    }

    if solute_volume.value <= 0.0 || solute_ph == NEUTRAL_PH {
        return Some(NEUTRAL_PH);
    }
    if solvent_volume.value <= 0.0 {
        return Some(solute_ph);
    }

    let fraction = (solute_volume / total).value;

    let ph = if solute_ph < NEUTRAL_PH {
        let neutral = ph_to_concentration_h3o(NEUTRAL_PH);
        let excess = ph_to_concentration_h3o(solute_ph) - neutral;
        concentration_h3o_to_ph(neutral + excess * fraction)
    } else {
        let neutral = ph_to_concentration_oh(NEUTRAL_PH);
        let excess = ph_to_concentration_oh(solute_ph) - neutral;
        concentration_oh_to_ph(neutral + excess * fraction)
    };

    Some(ph)
}
