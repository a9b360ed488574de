//! A beaker filled by a dropper and a water faucet and emptied by a drain.
//!
//! This crate advances a [`Solution`](phscale_chemistry::Solution) through
//! time and answers what a pH probe reads wherever it is placed.
//!
//! - [`FlowIntegrator`]: applies dropper, faucet, and drain flows to the
//!   solution each tick while keeping its volume within capacity
//! - [`probe`]: resolves which fluid a probe is touching
//! - [`Scene`]: owns the solution, flow sources, and geometry of one beaker
//! - [`run`]: drives a scene for many ticks and reports each step to an
//!   [`Observer`](phscale_core::Observer)
//! - [`config`]: serializable scene configuration
//!
//! # Example
//!
//! ```
//! use phscale_beaker::{Scene, SceneConfig, SourceRole};
//! use phscale_core::TimeStep;
//! use uom::si::{f64::VolumeRate, time::second, volume_rate::liter_per_second};
//!
//! let mut scene = Scene::new(&SceneConfig::default()).unwrap();
//! scene
//!     .set_flow_rate(SourceRole::WaterFaucet, VolumeRate::new::<liter_per_second>(0.1))
//!     .unwrap();
//! scene.tick(TimeStep::new::<second>(1.0).unwrap());
//!
//! assert!(scene.solution().ph().is_some());
//! ```

pub mod config;
pub mod geometry;
pub mod probe;
pub mod run;

mod error;
mod flow;
mod integrator;
mod scene;

pub use config::SceneConfig;
pub use error::{ConfigError, FlowRateError};
pub use flow::{FlowSource, FlowSources, Reservoir, SourceRole};
pub use integrator::{FlowIntegrator, TickReport};
pub use scene::Scene;
