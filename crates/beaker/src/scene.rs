use phscale_chemistry::{SoluteKind, Solution, SolutionSnapshot};
use phscale_core::TimeStep;
use tracing::{info, warn};
use uom::{
    ConstZero,
    si::{
        f64::{Time, Volume, VolumeRate},
        volume::liter,
    },
};

use crate::{
    ConfigError, FlowIntegrator, FlowRateError, FlowSource, FlowSources, Reservoir, SceneConfig,
    SourceRole, TickReport,
    geometry::{BeakerGeometry, Point},
    probe::{self, ProbeReading, ProbeRegions},
};

/// One beaker with its solution, flow sources, and probe geometry.
///
/// A scene starts from the initial solution in its configuration and can
/// always return to it with [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    solution: Solution,
    sources: FlowSources,
    integrator: FlowIntegrator,
    geometry: BeakerGeometry,
    initial: SolutionSnapshot,
    initial_reservoir: Reservoir,
    time: Time,
}

impl Scene {
    /// Builds a scene from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any part of `config` is invalid.
    pub fn new(config: &SceneConfig) -> Result<Self, ConfigError> {
        let integrator = FlowIntegrator::new(config.capacity()?).map_err(ConfigError::Capacity)?;
        let solution = config.initial_solution()?;
        let sources = config.flow_sources()?;
        let geometry = config.geometry.build()?;

        let mut scene = Self {
            initial: solution.snapshot(),
            initial_reservoir: sources.reservoir,
            solution,
            sources,
            integrator,
            geometry,
            time: Time::ZERO,
        };
        scene.update_enablement();
        Ok(scene)
    }

    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[must_use]
    pub fn sources(&self) -> &FlowSources {
        &self.sources
    }

    #[must_use]
    pub fn source(&self, role: SourceRole) -> &FlowSource {
        self.sources.get(role)
    }

    #[must_use]
    pub fn capacity(&self) -> Volume {
        self.integrator.capacity()
    }

    #[must_use]
    pub fn geometry(&self) -> &BeakerGeometry {
        &self.geometry
    }

    /// Returns the simulation time elapsed since construction or the last reset.
    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }

    /// Requests a flow rate for one source and returns the rate applied.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowRateError`] if `rate` is negative or NaN.
    pub fn set_flow_rate(
        &mut self,
        role: SourceRole,
        rate: VolumeRate,
    ) -> Result<VolumeRate, FlowRateError> {
        self.sources.get_mut(role).set_rate(rate)
    }

    /// Shuts off the dropper and both faucets.
    pub fn close_all(&mut self) {
        self.sources.close_all();
    }

    /// Switches the dropper to a new solute.
    ///
    /// The beaker is refilled with the configured initial volumes of the new
    /// solute and the dropper's reservoir is restocked.
    pub fn select_solute(&mut self, solute: SoluteKind) {
        info!(solute = %solute, "solute selected, beaker refilled");

        self.solution = Solution::new(
            solute,
            self.initial.solute_volume,
            self.initial.solvent_volume,
        );
        self.sources.reservoir = self.initial_reservoir;
        self.update_enablement();
    }

    /// Advances the scene by `dt`.
    pub fn tick(&mut self, dt: TimeStep) -> TickReport {
        let report = self.integrator.tick(&mut self.solution, &mut self.sources, dt);
        self.time += dt.into_inner();
        report
    }

    /// Returns the regions a probe can touch in the current state.
    #[must_use]
    pub fn regions(&self) -> ProbeRegions {
        self.geometry.regions(&self.solution, self.capacity(), &self.sources)
    }

    /// Returns what a probe at `point` reads.
    #[must_use]
    pub fn probe(&self, point: Point) -> ProbeReading {
        probe::resolve(point, &self.regions(), &self.solution)
    }

    /// Restores the initial solution, closes every source, and restarts the clock.
    pub fn reset(&mut self) {
        info!(solute = %self.initial.solute, "scene reset");

        self.solution = Solution::from(self.initial);
        self.sources.reservoir = self.initial_reservoir;
        self.sources.close_all();
        self.time = Time::ZERO;
        self.update_enablement();
    }

    /// Captures the solute and volumes of the current solution.
    #[must_use]
    pub fn snapshot(&self) -> SolutionSnapshot {
        self.solution.snapshot()
    }

    /// Replaces the current solution with `snapshot`.
    ///
    /// A snapshot holding more than the beaker's capacity is scaled down
    /// proportionally, which keeps its pH.
    pub fn restore(&mut self, snapshot: &SolutionSnapshot) {
        self.solution.restore(snapshot);
        if self.integrator.enforce_capacity(&mut self.solution) {
            warn!(
                capacity_liters = self.capacity().get::<liter>(),
                "restored solution exceeded capacity and was scaled down"
            );
        }
        self.update_enablement();
    }

    fn update_enablement(&mut self) {
        self.integrator
            .update_enablement(&self.solution, &mut self.sources);
    }
}
