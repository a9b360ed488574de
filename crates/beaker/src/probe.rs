//! Resolves which fluid a pH probe is touching.
//!
//! The probe can touch at most one fluid at a time.
//! When regions overlap, the first match in this order wins:
//!
//! 1. The solution in the beaker.
//! 2. The drain stream, which carries the same well-mixed solution.
//! 3. The dropper stream, reporting the undiluted solute's pH.
//! 4. The water faucet stream, reporting neutral water.
//!
//! The solution and drain report the beaker's mixed pH.
//! Incoming streams have not mixed yet, so they report their own pH.

use phscale_chemistry::Solution;

use crate::geometry::{Point, Rect};

/// The kind of fluid a probe is touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidKind {
    Solution,
    DropperStream,
    WaterStream,
    DrainStream,
    None,
}

impl FluidKind {
    /// Fluids in the order they are tested against the probe position.
    pub const PRIORITY: [Self; 4] = [
        Self::Solution,
        Self::DrainStream,
        Self::DropperStream,
        Self::WaterStream,
    ];
}

/// What the probe reads at its current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    pub fluid: FluidKind,

    /// The measured pH, or `None` if the probe touches nothing or the
    /// solution is empty.
    pub ph: Option<f64>,
}

impl ProbeReading {
    /// A reading with nothing under the probe.
    pub const NOTHING: Self = Self {
        fluid: FluidKind::None,
        ph: None,
    };
}

/// The regions a probe can touch, with `None` marking an inactive region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbeRegions {
    pub solution: Option<Rect>,
    pub drain: Option<Rect>,
    pub dropper: Option<Rect>,
    pub water: Option<Rect>,
}

impl ProbeRegions {
    /// Returns the region for `fluid`, if it is active.
    #[must_use]
    pub fn get(&self, fluid: FluidKind) -> Option<Rect> {
        match fluid {
            FluidKind::Solution => self.solution,
            FluidKind::DrainStream => self.drain,
            FluidKind::DropperStream => self.dropper,
            FluidKind::WaterStream => self.water,
            FluidKind::None => None,
        }
    }
}

/// Returns what a probe at `point` reads.
///
/// This is a pure function of its inputs and can be called between ticks.
#[must_use]
pub fn resolve(point: Point, regions: &ProbeRegions, solution: &Solution) -> ProbeReading {
    let fluid = FluidKind::PRIORITY
        .into_iter()
        .find(|&fluid| regions.get(fluid).is_some_and(|rect| rect.contains(point)))
        .unwrap_or(FluidKind::None);

    let ph = match fluid {
        FluidKind::Solution | FluidKind::DrainStream => solution.ph(),
        FluidKind::DropperStream => Some(solution.solute().ph()),
        FluidKind::WaterStream => Some(Solution::SOLVENT_PH),
        FluidKind::None => None,
    };

    ProbeReading { fluid, ph }
}

#[cfg(test)]
mod tests {
    use super::*;

    use phscale_chemistry::solute::SODA_POP;
    use uom::si::{
        f64::{Length, Volume},
        length::centimeter,
        volume::liter,
    };

    fn cm(x: f64, y: f64) -> Point {
        Point::new(Length::new::<centimeter>(x), Length::new::<centimeter>(y))
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::from_corners(cm(x0, y0), cm(x1, y1))
    }

    fn diluted_soda() -> Solution {
        Solution::new(
            SODA_POP,
            Volume::new::<liter>(0.1),
            Volume::new::<liter>(0.4),
        )
    }

    fn all_regions() -> ProbeRegions {
        ProbeRegions {
            solution: Some(rect(0.0, 0.0, 20.0, 8.0)),
            drain: Some(rect(16.0, -10.0, 18.0, 0.0)),
            dropper: Some(rect(9.0, 0.0, 11.0, 40.0)),
            water: Some(rect(2.0, 0.0, 4.0, 30.0)),
        }
    }

    #[test]
    fn probe_in_solution_reads_mixed_ph() {
        let solution = diluted_soda();
        let reading = resolve(cm(10.0, 4.0), &all_regions(), &solution);

        assert_eq!(reading.fluid, FluidKind::Solution);
        assert_eq!(reading.ph, solution.ph());
    }

    #[test]
    fn incoming_streams_read_their_own_ph() {
        let solution = diluted_soda();
        let regions = all_regions();

        let dropper = resolve(cm(10.0, 20.0), &regions, &solution);
        assert_eq!(dropper.fluid, FluidKind::DropperStream);
        assert_eq!(dropper.ph, Some(SODA_POP.ph()));

        let water = resolve(cm(3.0, 20.0), &regions, &solution);
        assert_eq!(water.fluid, FluidKind::WaterStream);
        assert_eq!(water.ph, Some(7.0));
    }

    #[test]
    fn drain_stream_reads_mixed_ph() {
        let solution = diluted_soda();
        let reading = resolve(cm(17.0, -5.0), &all_regions(), &solution);

        assert_eq!(reading.fluid, FluidKind::DrainStream);
        assert_eq!(reading.ph, solution.ph());
    }

    #[test]
    fn solution_wins_over_overlapping_drain() {
        let solution = diluted_soda();
        let regions = ProbeRegions {
            solution: Some(rect(0.0, 0.0, 20.0, 8.0)),
            drain: Some(rect(0.0, 0.0, 20.0, 8.0)),
            ..ProbeRegions::default()
        };

        let reading = resolve(cm(5.0, 5.0), &regions, &solution);
        assert_eq!(reading.fluid, FluidKind::Solution);
    }

    #[test]
    fn drain_wins_over_dropper_and_dropper_over_water() {
        let solution = diluted_soda();
        let everywhere = rect(-100.0, -100.0, 100.0, 100.0);

        let regions = ProbeRegions {
            solution: None,
            drain: Some(everywhere),
            dropper: Some(everywhere),
            water: Some(everywhere),
        };
        assert_eq!(
            resolve(cm(0.0, 0.0), &regions, &solution).fluid,
            FluidKind::DrainStream
        );

        let regions = ProbeRegions {
            drain: None,
            ..regions
        };
        assert_eq!(
            resolve(cm(0.0, 0.0), &regions, &solution).fluid,
            FluidKind::DropperStream
        );
    }

    #[test]
    fn inactive_regions_are_ignored() {
        let solution = diluted_soda();
        let reading = resolve(cm(10.0, 4.0), &ProbeRegions::default(), &solution);
        assert_eq!(reading, ProbeReading::NOTHING);
    }

    #[test]
    fn outside_every_region_reads_nothing() {
        let solution = diluted_soda();
        let reading = resolve(cm(50.0, 50.0), &all_regions(), &solution);
        assert_eq!(reading, ProbeReading::NOTHING);
    }
}
