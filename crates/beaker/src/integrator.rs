use phscale_chemistry::Solution;
use phscale_core::{
    TimeStep,
    constraint::{Constrained, ConstraintError, StrictlyPositive},
};
use tracing::debug;
use uom::{
    ConstZero,
    si::{f64::Volume, volume::cubic_meter, volume::liter},
};

use crate::FlowSources;

/// Advances a beaker's solution through time.
///
/// Each [`tick`](Self::tick) applies the flows from the dropper and both
/// faucets over a time step, in this order:
///
/// 1. The dropper adds solute, limited by its reservoir.
/// 2. The water faucet adds solvent.
/// 3. Volume beyond capacity is rejected, cutting back the solvent before
///    the solute so that the beaker ends exactly full.
/// 4. The drain removes solute and solvent in proportion to their share of
///    the post-addition volume, which leaves the pH unchanged.
///    Draining at least the whole volume empties the beaker.
/// 5. The enabled state of each source is re-derived from the new volume.
///
/// Ticks are pure arithmetic: identical inputs give bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowIntegrator {
    capacity: Constrained<Volume, StrictlyPositive>,
}

/// The volumes moved during a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub solute_added: Volume,
    pub solvent_added: Volume,

    /// Volume that would have overflowed the beaker and was not added.
    pub rejected: Volume,

    pub drained: Volume,

    /// `true` if the drain emptied the beaker during this tick.
    pub emptied: bool,
}

impl TickReport {
    fn idle() -> Self {
        Self {
            solute_added: Volume::ZERO,
            solvent_added: Volume::ZERO,
            rejected: Volume::ZERO,
            drained: Volume::ZERO,
            emptied: false,
        }
    }
}

impl FlowIntegrator {
    /// Creates an integrator for a beaker of the given capacity.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `capacity` is not strictly positive.
    pub fn new(capacity: Volume) -> Result<Self, ConstraintError> {
        Ok(Self {
            capacity: Constrained::new(capacity)?,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> Volume {
        self.capacity.into_inner()
    }

    /// Advances `solution` by `dt` using the rates of `sources`.
    ///
    /// A zero `dt` moves no volume but still re-derives source enablement.
    pub fn tick(
        &self,
        solution: &mut Solution,
        sources: &mut FlowSources,
        dt: TimeStep,
    ) -> TickReport {
        let mut report = TickReport::idle();

        let solute_requested = sources.reservoir.available(sources.dropper.volume_over(dt));
        let solvent_requested = sources.water.volume_over(dt);

        if solute_requested > Volume::ZERO || solvent_requested > Volume::ZERO {
            let (solute_added, solvent_added) =
                self.fill(solution, solute_requested, solvent_requested);
            sources.reservoir.withdraw(solute_added);

            report.solute_added = solute_added;
            report.solvent_added = solvent_added;
            report.rejected = non_negative(
                (solute_requested - solute_added) + (solvent_requested - solvent_added),
            );

            if report.rejected > Volume::ZERO {
                debug!(
                    rejected_liters = report.rejected.get::<liter>(),
                    "beaker full, overflow rejected"
                );
            }
        }

        let (drained, emptied) = drain(solution, sources.drain.volume_over(dt));
        report.drained = drained;
        report.emptied = emptied;
        if emptied {
            debug!(
                drained_liters = drained.get::<liter>(),
                "beaker drained empty"
            );
        }

        self.update_enablement(solution, sources);
        report
    }

    /// Re-derives which sources are enabled from the current volume.
    ///
    /// - The water faucet is enabled while the beaker is below capacity.
    /// - The drain faucet is enabled while the beaker holds any solution.
    /// - The dropper is enabled while the beaker is below capacity and its
    ///   reservoir is not empty.
    ///
    /// A source that becomes disabled is shut off.
    pub fn update_enablement(&self, solution: &Solution, sources: &mut FlowSources) {
        let total = solution.total_volume();
        let below_capacity = total < self.capacity();

        sources.water.set_enabled(below_capacity);
        sources.drain.set_enabled(total > Volume::ZERO);
        sources
            .dropper
            .set_enabled(below_capacity && !sources.reservoir.is_empty());
    }

    /// Scales both volumes down in proportion if the solution exceeds capacity.
    ///
    /// Proportional scaling keeps the pH unchanged.
    /// Returns `true` if the solution was scaled.
    pub fn enforce_capacity(&self, solution: &mut Solution) -> bool {
        let capacity = self.capacity();
        let total = solution.total_volume();
        if total <= capacity {
            return false;
        }

        let scale = (capacity / total).value;
        let (solute, solvent) = settle(
            solution.solute_volume() * scale,
            solution.solvent_volume() * scale,
            capacity,
        );
        solution.set_volumes(solute, solvent);
        true
    }

    /// Adds solute then solvent, rejecting whatever would overflow.
    ///
    /// Returns the volumes actually added.
    fn fill(&self, solution: &mut Solution, solute: Volume, solvent: Volume) -> (Volume, Volume) {
        let capacity = self.capacity();
        let solute_before = solution.solute_volume();
        let solvent_before = solution.solvent_volume();
        let headroom = non_negative(capacity - solution.total_volume());

        if solute + solvent <= headroom {
            solution.apply_volume_delta(solute, solvent);
        } else if solute < headroom {
            solution.apply_volume_delta(solute, headroom - solute);
        } else {
            solution.apply_volume_delta(headroom, Volume::ZERO);
        }

        if solution.total_volume() >= capacity || solute + solvent > headroom {
            let (solute, solvent) =
                settle(solution.solute_volume(), solution.solvent_volume(), capacity);
            solution.set_volumes(solute, solvent);
        }

        (
            non_negative(solution.solute_volume() - solute_before),
            non_negative(solution.solvent_volume() - solvent_before),
        )
    }
}

/// Removes `requested` volume in proportion to each component's share.
///
/// Returns the volume removed and whether the beaker was emptied.
fn drain(solution: &mut Solution, requested: Volume) -> (Volume, bool) {
    let total = solution.total_volume();
    if requested <= Volume::ZERO || total <= Volume::ZERO {
        return (Volume::ZERO, false);
    }

    if requested >= total {
        solution.set_volumes(Volume::ZERO, Volume::ZERO);
        return (total, true);
    }

    let solute_share = (solution.solute_volume() / total).value;
    let solvent_share = (solution.solvent_volume() / total).value;
    solution.apply_volume_delta(-(requested * solute_share), -(requested * solvent_share));
    (requested, false)
}

/// Splits `capacity` into a solute and a solvent volume that sum to it exactly.
///
/// The larger of the two volumes is kept, held within `[capacity / 2, capacity]`,
/// and the smaller is recomputed as the remainder.
/// That subtraction is exact (Sterbenz), so the sum rounds to `capacity` itself
/// rather than to a neighboring float.
/// Both inputs are expected to be within rounding of summing to `capacity`.
fn settle(solute: Volume, solvent: Volume, capacity: Volume) -> (Volume, Volume) {
    let capacity = capacity.value;
    let half = capacity / 2.0;

    let (solute, solvent) = if solute.value >= solvent.value {
        let solute = solute.value.clamp(half, capacity);
        (solute, capacity - solute)
    } else {
        let solvent = solvent.value.clamp(half, capacity);
        (capacity - solvent, solvent)
    };

    (
        Volume::new::<cubic_meter>(solute),
        Volume::new::<cubic_meter>(solvent),
    )
}

fn non_negative(volume: Volume) -> Volume {
    if volume > Volume::ZERO {
        volume
    } else {
        Volume::ZERO
    }
}
