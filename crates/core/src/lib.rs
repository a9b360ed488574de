//! Core types for the phscale beaker simulation.
//!
//! This crate defines the small set of shared abstractions that the chemistry
//! and beaker crates build on:
//!
//! - [`constraint`]: construction-time numeric invariants such as
//!   [`NonNegative`](constraint::NonNegative) volumes and
//!   [`StrictlyPositive`](constraint::StrictlyPositive) capacities
//! - [`TimeStep`]: a unit-safe, non-negative simulation time step
//! - [`Observer`]: receives simulation events and optionally returns control actions

pub mod constraint;

mod observer;
mod time_step;

pub use observer::Observer;
pub use time_step::{TimeStep, TimeStepError};
