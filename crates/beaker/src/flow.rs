use std::fmt;

use phscale_core::{
    TimeStep,
    constraint::{Constrained, ConstraintError, NonNegative},
};
use serde::{Deserialize, Serialize};
use uom::{
    ConstZero,
    si::{
        f64::{Volume, VolumeRate},
        volume_rate::liter_per_second,
    },
};

use crate::FlowRateError;

/// The fixed role of a flow source relative to the beaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRole {
    /// Dispenses undiluted solute into the beaker.
    Dropper,
    /// Adds neutral water into the beaker.
    WaterFaucet,
    /// Removes well-mixed solution from the beaker.
    DrainFaucet,
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dropper => "dropper",
            Self::WaterFaucet => "water faucet",
            Self::DrainFaucet => "drain faucet",
        })
    }
}

/// A dropper or faucet with an adjustable flow rate.
///
/// The flow rate is a non-negative magnitude; its direction comes from the
/// source's [`SourceRole`].
/// Whether the source is enabled is derived by the
/// [`FlowIntegrator`](crate::FlowIntegrator) from the beaker's state.
/// A disabled source is shut off and ignores rate requests until it is
/// enabled again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSource {
    role: SourceRole,
    rate: VolumeRate,
    max_rate: Constrained<VolumeRate, NonNegative>,
    enabled: bool,
}

impl FlowSource {
    /// Creates a closed, enabled source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `max_rate` is negative or NaN.
    pub fn new(role: SourceRole, max_rate: VolumeRate) -> Result<Self, ConstraintError> {
        Ok(Self {
            role,
            rate: VolumeRate::ZERO,
            max_rate: Constrained::new(max_rate)?,
            enabled: true,
        })
    }

    #[must_use]
    pub fn role(&self) -> SourceRole {
        self.role
    }

    #[must_use]
    pub fn rate(&self) -> VolumeRate {
        self.rate
    }

    #[must_use]
    pub fn max_rate(&self) -> VolumeRate {
        self.max_rate.into_inner()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if the source is open.
    #[must_use]
    pub fn is_flowing(&self) -> bool {
        self.rate > VolumeRate::ZERO
    }

    /// Requests a new flow rate and returns the rate actually applied.
    ///
    /// Requests above the maximum are clamped to it.
    /// A disabled source stays shut and the applied rate is zero.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowRateError`] if `rate` is negative or NaN.
    pub fn set_rate(&mut self, rate: VolumeRate) -> Result<VolumeRate, FlowRateError> {
        let liters_per_second = rate.get::<liter_per_second>();
        if liters_per_second.is_nan() {
            return Err(FlowRateError::NotANumber { role: self.role });
        }
        if liters_per_second < 0.0 {
            return Err(FlowRateError::Negative {
                role: self.role,
                liters_per_second,
            });
        }

        let max_rate = self.max_rate();
        self.rate = if !self.enabled {
            VolumeRate::ZERO
        } else if rate > max_rate {
            max_rate
        } else {
            rate
        };
        Ok(self.rate)
    }

    /// Shuts the source off.
    pub fn close(&mut self) {
        self.rate = VolumeRate::ZERO;
    }

    /// Returns the volume delivered over `dt` at the current rate.
    #[must_use]
    pub fn volume_over(&self, dt: TimeStep) -> Volume {
        self.rate * dt.into_inner()
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.close();
        }
    }
}

/// The supply of solute behind the dropper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reservoir {
    remaining: Option<Volume>,
}

impl Reservoir {
    /// A reservoir that never runs dry.
    #[must_use]
    pub fn unlimited() -> Self {
        Self { remaining: None }
    }

    /// A reservoir holding a finite volume of solute.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `volume` is negative or NaN.
    pub fn finite(volume: Volume) -> Result<Self, ConstraintError> {
        let volume = NonNegative::new(volume)?.into_inner();
        Ok(Self {
            remaining: Some(volume),
        })
    }

    /// Returns the remaining volume, or `None` if the reservoir is unlimited.
    #[must_use]
    pub fn remaining(&self) -> Option<Volume> {
        self.remaining
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_some_and(|v| v <= Volume::ZERO)
    }

    /// Returns how much of `requested` the reservoir can supply.
    #[must_use]
    pub fn available(&self, requested: Volume) -> Volume {
        match self.remaining {
            Some(remaining) if remaining < requested => remaining,
            _ => requested,
        }
    }

    pub(crate) fn withdraw(&mut self, volume: Volume) {
        if let Some(remaining) = self.remaining.as_mut() {
            let left = *remaining - volume;
            *remaining = if left > Volume::ZERO {
                left
            } else {
                Volume::ZERO
            };
        }
    }
}

/// The dropper, both faucets, and the dropper's reservoir for one beaker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSources {
    pub dropper: FlowSource,
    pub water: FlowSource,
    pub drain: FlowSource,
    pub reservoir: Reservoir,
}

impl FlowSources {
    #[must_use]
    pub fn get(&self, role: SourceRole) -> &FlowSource {
        match role {
            SourceRole::Dropper => &self.dropper,
            SourceRole::WaterFaucet => &self.water,
            SourceRole::DrainFaucet => &self.drain,
        }
    }

    #[must_use]
    pub fn get_mut(&mut self, role: SourceRole) -> &mut FlowSource {
        match role {
            SourceRole::Dropper => &mut self.dropper,
            SourceRole::WaterFaucet => &mut self.water,
            SourceRole::DrainFaucet => &mut self.drain,
        }
    }

    /// Shuts off every source.
    pub fn close_all(&mut self) {
        self.dropper.close();
        self.water.close();
        self.drain.close();
    }

    /// Returns `true` if the dropper is dispensing solute.
    #[must_use]
    pub fn is_dispensing(&self) -> bool {
        self.dropper.is_enabled() && self.dropper.is_flowing()
    }
}
