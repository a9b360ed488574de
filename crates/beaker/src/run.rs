//! Drives a scene through a fixed number of ticks.
//!
//! Flow rates are held constant for the whole run; change them between runs
//! to model a sequence of phases.
//!
//! # Example
//!
//! ```
//! use phscale_beaker::{Scene, SceneConfig, SourceRole, run};
//! use phscale_core::TimeStep;
//! use uom::si::{f64::VolumeRate, time::second, volume_rate::liter_per_second};
//!
//! let mut scene = Scene::new(&SceneConfig::default()).unwrap();
//! scene
//!     .set_flow_rate(SourceRole::WaterFaucet, VolumeRate::new::<liter_per_second>(0.05))
//!     .unwrap();
//!
//! let run = run::run_unobserved(&mut scene, TimeStep::new::<second>(0.1).unwrap(), 10);
//!
//! assert_eq!(run.history.len(), 11);
//! ```

mod action;
mod event;
mod outcome;

pub use action::Action;
pub use event::{Event, Sample};
pub use outcome::{Run, Status};

use phscale_core::{Observer, TimeStep};

use crate::Scene;

/// Upper bound on the history reserved up front; longer runs grow it as they go.
const PREALLOCATED_SAMPLES: usize = 4096;

/// Ticks `scene` forward `steps` times by `dt`.
///
/// # Algorithm
///
/// 1. Sample the initial state and emit it as step 0.
/// 2. For each step:
///    - Tick the scene by `dt`.
///    - Sample the new state and record it in the history.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns [`Action::StopEarly`], terminate.
/// 3. Return the run with the full history.
///
/// The scene is left in its final state.
pub fn run<Obs>(scene: &mut Scene, dt: TimeStep, steps: usize, mut observer: Obs) -> Run
where
    Obs: Observer<Event, Action>,
{
    let initial = Sample::new(scene.time(), scene.solution());

    let mut history = Vec::with_capacity(steps.saturating_add(1).min(PREALLOCATED_SAMPLES));
    history.push(initial);

    let event = Event {
        step: 0,
        sample: initial,
        report: None,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Run {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        };
    }

    for step in 1..=steps {
        let report = scene.tick(dt);
        let sample = Sample::new(scene.time(), scene.solution());
        history.push(sample);

        let event = Event {
            step,
            sample,
            report: Some(report),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Run {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            };
        }
    }

    Run {
        status: Status::Complete,
        history,
        steps,
    }
}

/// Ticks `scene` forward without observation.
///
/// This is a convenience wrapper around [`run`] that discards events.
pub fn run_unobserved(scene: &mut Scene, dt: TimeStep, steps: usize) -> Run {
    run(scene, dt, steps, ())
}
