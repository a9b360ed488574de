use phscale_chemistry::Solution;
use uom::si::f64::{Time, Volume};

use crate::TickReport;

/// Event emitted by [`run`](super::run) for each step.
///
/// Step 0 is the initial state before any tick.
/// Steps 1..N are emitted after each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The step number (0 for initial, 1..N for ticks).
    pub step: usize,

    /// State of the beaker at this step.
    pub sample: Sample,

    /// Volumes moved by the tick that produced this step, absent for step 0.
    pub report: Option<TickReport>,
}

/// The beaker's volumes and pH at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: Time,
    pub solute_volume: Volume,
    pub solvent_volume: Volume,
    pub ph: Option<f64>,
}

impl Sample {
    pub(crate) fn new(time: Time, solution: &Solution) -> Self {
        Self {
            time,
            solute_volume: solution.solute_volume(),
            solvent_volume: solution.solvent_volume(),
            ph: solution.ph(),
        }
    }

    #[must_use]
    pub fn total_volume(&self) -> Volume {
        self.solute_volume + self.solvent_volume
    }
}
