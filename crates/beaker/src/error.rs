use phscale_core::constraint::ConstraintError;
use thiserror::Error;

use crate::SourceRole;

/// Errors that may occur when building a [`Scene`](crate::Scene) from configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid beaker capacity: {0}")]
    Capacity(#[source] ConstraintError),

    #[error("invalid initial {which} volume: {source}")]
    InitialVolume {
        which: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The initial solute and solvent do not fit in the beaker.
    #[error("initial volume of {total_liters} L exceeds the {capacity_liters} L capacity")]
    OverCapacity {
        total_liters: f64,
        capacity_liters: f64,
    },

    #[error("invalid solute: {0}")]
    Solute(#[source] ConstraintError),

    /// A stock solute was requested by the `custom` identifier, which has no pH.
    #[error("a custom solute must be configured with `custom_ph`")]
    CustomWithoutPh,

    #[error("invalid maximum {role} flow rate: {source}")]
    MaxFlowRate {
        role: SourceRole,
        #[source]
        source: ConstraintError,
    },

    #[error("invalid dropper reservoir: {0}")]
    Reservoir(#[source] ConstraintError),

    /// A region is degenerate or not finite.
    #[error("invalid {region} geometry: {reason}")]
    Geometry {
        region: &'static str,
        reason: &'static str,
    },
}

/// Errors returned when a flow rate request is rejected.
///
/// Requests above a source's maximum are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FlowRateError {
    #[error("{role} flow rate must not be negative, got {liters_per_second} L/s")]
    Negative {
        role: SourceRole,
        liters_per_second: f64,
    },

    #[error("{role} flow rate is not a number")]
    NotANumber { role: SourceRole },
}
