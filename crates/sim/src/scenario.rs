//! Scenarios: a scene plus an ordered list of phases with fixed flow rates.

use anyhow::{Context, Result, ensure};
use phscale_beaker::{
    Scene, SceneConfig, SourceRole,
    config::SoluteSelection,
    geometry::Point,
    probe::{FluidKind, ProbeReading},
    run::{self, Event},
};
use phscale_core::TimeStep;
use serde::Deserialize;
use tracing::{debug, info};
use uom::si::{
    f64::{Length, Time, VolumeRate},
    length::centimeter,
    time::second,
    volume::liter,
    volume_rate::liter_per_second,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_dt_seconds")]
    pub dt_seconds: f64,

    #[serde(default)]
    pub scene: SceneConfig,

    #[serde(default, rename = "phase")]
    pub phases: Vec<Phase>,
}

/// Most ticks a single phase may take.
const MAX_PHASE_STEPS: f64 = 1e8;

fn default_dt_seconds() -> f64 {
    0.1
}

/// A span of time with constant flow rates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Phase {
    pub name: String,
    pub duration_seconds: f64,

    /// Solute to switch to at the start of the phase, which refills the beaker.
    #[serde(default)]
    pub solute: Option<SoluteSelection>,

    #[serde(default)]
    pub dropper_liters_per_second: f64,
    #[serde(default)]
    pub water_liters_per_second: f64,
    #[serde(default)]
    pub drain_liters_per_second: f64,

    /// Probe position in centimeters, read at the end of the phase.
    #[serde(default)]
    pub probe_cm: Option<[f64; 2]>,
}

/// The state of the beaker at the end of a phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseResult {
    pub name: String,
    pub time: Time,
    pub solute_liters: f64,
    pub solvent_liters: f64,
    pub ph: Option<f64>,
    pub rejected_liters: f64,
    pub probe: Option<ProbeReading>,
}

impl Scenario {
    /// Parses a scenario from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has unknown fields.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse scenario")
    }

    /// Runs every phase in order and returns the state after each.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene configuration, time step, or any phase
    /// is invalid.
    pub fn run(&self) -> Result<Vec<PhaseResult>> {
        let dt = TimeStep::new::<second>(self.dt_seconds).context("invalid dt_seconds")?;
        ensure!(!dt.is_zero(), "dt_seconds must be positive");

        let mut scene = Scene::new(&self.scene).context("invalid scene")?;
        info!(
            capacity_liters = scene.capacity().get::<liter>(),
            solute = %scene.solution().solute(),
            phases = self.phases.len(),
            "scenario loaded"
        );

        self.phases
            .iter()
            .map(|phase| {
                phase
                    .run(&mut scene, dt)
                    .with_context(|| format!("phase `{}` failed", phase.name))
            })
            .collect()
    }
}

impl Phase {
    fn run(&self, scene: &mut Scene, dt: TimeStep) -> Result<PhaseResult> {
        ensure!(
            self.duration_seconds.is_finite() && self.duration_seconds >= 0.0,
            "duration_seconds must be finite and non-negative"
        );

        if let Some(selection) = self.solute {
            scene.select_solute(selection.resolve()?);
        }

        for (role, rate) in [
            (SourceRole::Dropper, self.dropper_liters_per_second),
            (SourceRole::WaterFaucet, self.water_liters_per_second),
            (SourceRole::DrainFaucet, self.drain_liters_per_second),
        ] {
            let applied = scene.set_flow_rate(role, VolumeRate::new::<liter_per_second>(rate))?;
            if applied.get::<liter_per_second>() < rate {
                debug!(
                    %role,
                    requested = rate,
                    applied = applied.get::<liter_per_second>(),
                    "flow rate limited"
                );
            }
        }

        let dt_seconds = dt.get::<second>();
        let exact_steps = self.duration_seconds / dt_seconds;
        ensure!(
            exact_steps <= MAX_PHASE_STEPS,
            "duration_seconds needs more than {MAX_PHASE_STEPS} steps of dt_seconds"
        );
        let whole_steps = exact_steps.round();
        if (exact_steps - whole_steps).abs() > 1e-9 * whole_steps.max(1.0) {
            debug!(
                phase = %self.name,
                duration_seconds = self.duration_seconds,
                simulated_seconds = whole_steps * dt_seconds,
                "duration rounded to a whole number of steps"
            );
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = whole_steps as usize;

        let mut rejected_liters = 0.0;
        let run = run::run(scene, dt, steps, |event: &Event| {
            if let Some(report) = event.report {
                rejected_liters += report.rejected.get::<liter>();
                if report.emptied {
                    info!(step = event.step, "beaker emptied");
                }
            }
            None
        });

        // Read the probe while the streams are still running.
        let probe = self.probe_cm.map(|[x, y]| {
            scene.probe(Point::new(
                Length::new::<centimeter>(x),
                Length::new::<centimeter>(y),
            ))
        });
        scene.close_all();

        let last = run.last().copied().context("run recorded no samples")?;

        let result = PhaseResult {
            name: self.name.clone(),
            time: last.time,
            solute_liters: last.solute_volume.get::<liter>(),
            solvent_liters: last.solvent_volume.get::<liter>(),
            ph: last.ph,
            rejected_liters,
            probe,
        };
        info!(
            phase = %result.name,
            steps = run.steps,
            time_seconds = result.time.get::<second>(),
            solute_liters = result.solute_liters,
            solvent_liters = result.solvent_liters,
            ph = ?result.ph,
            "phase complete"
        );
        Ok(result)
    }
}

impl PhaseResult {
    /// Formats the result as one line of the report table.
    #[must_use]
    pub fn row(&self) -> String {
        let ph = self.ph.map_or_else(|| "-".to_owned(), |ph| format!("{ph:.3}"));
        let probe = match self.probe {
            None => String::new(),
            Some(ProbeReading {
                fluid: FluidKind::None,
                ..
            }) => "probe: nothing".to_owned(),
            Some(ProbeReading { fluid, ph }) => format!(
                "probe: {fluid:?} pH {}",
                ph.map_or_else(|| "-".to_owned(), |ph| format!("{ph:.3}"))
            ),
        };
        let overflow = if self.rejected_liters > 0.0 {
            format!("  overflow={:.4} L", self.rejected_liters)
        } else {
            String::new()
        };
        format!(
            "{:<28} t={:>7.2} s  solute={:.4} L  solvent={:.4} L  pH={ph:<7}{overflow}  {probe}",
            self.name,
            self.time.get::<second>(),
            self.solute_liters,
            self.solvent_liters,
        )
    }
}
