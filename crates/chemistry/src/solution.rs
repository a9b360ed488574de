use uom::{
    ConstZero,
    si::f64::{AmountOfSubstance, MolarConcentration, Volume},
};

use crate::{
    Color, SoluteKind, Species,
    conversion::{self, NEUTRAL_PH},
    solute,
};

/// A solute concentrate diluted in water.
///
/// `Solution` holds the volume of undiluted solute and the volume of water
/// (the solvent) in the beaker, along with the active solute.
/// Everything else, including pH, concentrations, and quantities, is derived
/// on demand from those three values.
///
/// Each volume is kept non-negative, but `Solution` knows nothing about the
/// beaker's capacity; keeping the total within capacity is the caller's job.
///
/// An empty solution has no chemistry: [`ph`](Self::ph),
/// [`concentration`](Self::concentration), and [`quantity`](Self::quantity)
/// all return `None` rather than a numeric placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    solute: SoluteKind,
    solute_volume: Volume,
    solvent_volume: Volume,
}

/// A verbatim copy of the state needed to restore a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionSnapshot {
    pub solute: SoluteKind,
    pub solute_volume: Volume,
    pub solvent_volume: Volume,
}

impl Solution {
    /// The pH of the solvent.
    pub const SOLVENT_PH: f64 = NEUTRAL_PH;

    /// Creates a solution, clamping negative volumes to zero.
    #[must_use]
    pub fn new(solute: SoluteKind, solute_volume: Volume, solvent_volume: Volume) -> Self {
        Self {
            solute,
            solute_volume: non_negative(solute_volume),
            solvent_volume: non_negative(solvent_volume),
        }
    }

    /// Creates an empty solution of the given solute.
    #[must_use]
    pub fn empty(solute: SoluteKind) -> Self {
        Self::new(solute, Volume::ZERO, Volume::ZERO)
    }

    #[must_use]
    pub fn solute(&self) -> SoluteKind {
        self.solute
    }

    /// Replaces the active solute without touching either volume.
    pub fn set_solute(&mut self, solute: SoluteKind) {
        self.solute = solute;
    }

    #[must_use]
    pub fn solute_volume(&self) -> Volume {
        self.solute_volume
    }

    #[must_use]
    pub fn solvent_volume(&self) -> Volume {
        self.solvent_volume
    }

    #[must_use]
    pub fn total_volume(&self) -> Volume {
        self.solute_volume + self.solvent_volume
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_volume() == Volume::ZERO
    }

    /// Returns the pH of the mixture, or `None` if the solution is empty.
    ///
    /// See [`conversion::mixed_ph`] for the dilution rule.
    #[must_use]
    pub fn ph(&self) -> Option<f64> {
        conversion::mixed_ph(self.solute.ph(), self.solute_volume, self.solvent_volume)
    }

    /// Returns the concentration of `species`, or `None` if the solution is empty.
    #[must_use]
    pub fn concentration(&self, species: Species) -> Option<MolarConcentration> {
        self.ph().map(|ph| conversion::ph_to_concentration(species, ph))
    }

    /// Returns the moles of `species`, or `None` if the solution is empty.
    #[must_use]
    pub fn quantity(&self, species: Species) -> Option<AmountOfSubstance> {
        let volume = self.total_volume();
        self.ph().map(|ph| conversion::ph_to_moles(species, ph, volume))
    }

    /// Returns the number of `species` molecules, or `None` if the solution is empty.
    #[must_use]
    pub fn molecule_count(&self, species: Species) -> Option<f64> {
        self.quantity(species).map(conversion::moles_to_molecules)
    }

    /// Returns the display color, or `None` if the solution is empty.
    ///
    /// The solute's color fades toward the color of water as the solvent
    /// fraction grows.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        if self.is_empty() {
            return None;
        }
        let solvent_fraction = (self.solvent_volume / self.total_volume()).value;
        Some(
            self.solute
                .color()
                .blend(solute::WATER.color(), solvent_fraction),
        )
    }

    /// Adds signed volume deltas, clamping each component to zero or greater.
    pub fn apply_volume_delta(&mut self, solute_delta: Volume, solvent_delta: Volume) {
        self.solute_volume = non_negative(self.solute_volume + solute_delta);
        self.solvent_volume = non_negative(self.solvent_volume + solvent_delta);
    }

    /// Replaces both volumes, clamping each to zero or greater.
    pub fn set_volumes(&mut self, solute_volume: Volume, solvent_volume: Volume) {
        self.solute_volume = non_negative(solute_volume);
        self.solvent_volume = non_negative(solvent_volume);
    }

    /// Captures the solute and both volumes.
    #[must_use]
    pub fn snapshot(&self) -> SolutionSnapshot {
        SolutionSnapshot {
            solute: self.solute,
            solute_volume: self.solute_volume,
            solvent_volume: self.solvent_volume,
        }
    }

    /// Restores the solute and both volumes from a snapshot.
    pub fn restore(&mut self, snapshot: &SolutionSnapshot) {
        self.solute = snapshot.solute;
        self.set_volumes(snapshot.solute_volume, snapshot.solvent_volume);
    }
}

impl From<SolutionSnapshot> for Solution {
    fn from(snapshot: SolutionSnapshot) -> Self {
        Self::new(
            snapshot.solute,
            snapshot.solute_volume,
            snapshot.solvent_volume,
        )
    }
}

/// Returns `volume`, or zero if it is negative or NaN.
fn non_negative(volume: Volume) -> Volume {
    if volume.value > 0.0 {
        volume
    } else {
        Volume::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{amount_of_substance::mole, molar_concentration::mole_per_liter, volume::liter};

    use crate::solute::{BATTERY_ACID, COFFEE, DRAIN_CLEANER, WATER};

    fn liters(value: f64) -> Volume {
        Volume::new::<liter>(value)
    }

    #[test]
    fn empty_solution_has_no_chemistry() {
        let solution = Solution::empty(COFFEE);

        assert!(solution.is_empty());
        assert_eq!(solution.ph(), None);
        assert_eq!(solution.color(), None);
        for species in Species::ALL {
            assert_eq!(solution.concentration(species), None);
            assert_eq!(solution.quantity(species), None);
            assert_eq!(solution.molecule_count(species), None);
        }
    }

    #[test]
    fn pure_concentrate_reports_intrinsic_ph() {
        let solution = Solution::new(BATTERY_ACID, liters(0.25), Volume::ZERO);
        assert_eq!(solution.ph(), Some(BATTERY_ACID.ph()));
        assert_eq!(solution.color(), Some(BATTERY_ACID.color()));
    }

    #[test]
    fn pure_solvent_is_neutral() {
        let solution = Solution::new(DRAIN_CLEANER, Volume::ZERO, liters(0.8));
        assert_eq!(solution.ph(), Some(Solution::SOLVENT_PH));
        assert_eq!(solution.color(), Some(WATER.color()));
    }

    #[test]
    fn quantity_is_concentration_times_volume() {
        let solution = Solution::new(BATTERY_ACID, liters(0.1), liters(0.9));

        let c = solution
            .concentration(Species::H3O)
            .unwrap()
            .get::<mole_per_liter>();
        let n = solution.quantity(Species::H3O).unwrap().get::<mole>();
        assert_relative_eq!(n, c * 1.0, max_relative = 1e-12);

        let water = solution.quantity(Species::H2O).unwrap().get::<mole>();
        assert_relative_eq!(water, conversion::WATER_MOLARITY, max_relative = 1e-12);
    }

    #[test]
    fn diluted_base_has_more_hydroxide_than_hydronium() {
        let solution = Solution::new(DRAIN_CLEANER, liters(0.05), liters(0.5));

        let ph = solution.ph().unwrap();
        assert!(ph > 7.0 && ph < DRAIN_CLEANER.ph());

        let h3o = solution.concentration(Species::H3O).unwrap();
        let oh = solution.concentration(Species::OH).unwrap();
        assert!(oh > h3o);
    }

    #[test]
    fn volume_deltas_clamp_at_zero() {
        let mut solution = Solution::new(COFFEE, liters(0.2), liters(0.3));

        solution.apply_volume_delta(liters(-0.5), liters(0.1));
        assert_eq!(solution.solute_volume(), Volume::ZERO);
        assert_relative_eq!(solution.solvent_volume().get::<liter>(), 0.4, epsilon = 1e-12);

        solution.apply_volume_delta(liters(0.1), liters(-1.0));
        assert_relative_eq!(solution.solute_volume().get::<liter>(), 0.1, epsilon = 1e-12);
        assert_eq!(solution.solvent_volume(), Volume::ZERO);
    }

    #[test]
    fn constructor_clamps_negative_volumes() {
        let solution = Solution::new(COFFEE, liters(-0.2), liters(f64::NAN));
        assert!(solution.is_empty());
    }

    #[test]
    fn changing_solute_keeps_volumes() {
        let mut solution = Solution::new(COFFEE, liters(0.2), liters(0.3));
        solution.set_solute(BATTERY_ACID);

        assert_eq!(solution.solute(), BATTERY_ACID);
        assert_relative_eq!(solution.total_volume().get::<liter>(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn snapshot_round_trip() {
        let original = Solution::new(COFFEE, liters(0.2), liters(0.3));
        let snapshot = original.snapshot();

        let mut solution = Solution::empty(BATTERY_ACID);
        solution.restore(&snapshot);
        assert_eq!(solution, original);
        assert_eq!(Solution::from(snapshot), original);
    }
}
