//! Serializable scene configuration.
//!
//! Values are plain numbers in liters, liters per second, and centimeters so
//! a scene can be written by hand in TOML.
//! Every field has a default matching the standard beaker, so a
//! configuration only needs to name what it changes:
//!
//! ```toml
//! capacity_liters = 1.2
//! solute = "coffee"
//! initial_solute_liters = 0.3
//!
//! [dropper]
//! reservoir_liters = 0.5
//! ```

use phscale_chemistry::{SoluteId, SoluteKind, Solution};
use phscale_core::constraint::{NonNegative, StrictlyPositive};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Volume, VolumeRate},
    length::centimeter,
    volume::liter,
    volume_rate::liter_per_second,
};

use crate::{
    ConfigError, FlowSource, FlowSources, Reservoir, SourceRole,
    geometry::{BeakerGeometry, Point, Rect},
};

/// Configuration for a [`Scene`](crate::Scene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub capacity_liters: f64,
    pub solute: SoluteSelection,
    pub initial_solute_liters: f64,
    pub initial_solvent_liters: f64,
    pub dropper: DropperConfig,
    pub water_faucet: FaucetConfig,
    pub drain_faucet: FaucetConfig,
    pub geometry: GeometryConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            capacity_liters: 1.2,
            solute: SoluteSelection::default(),
            initial_solute_liters: 0.5,
            initial_solvent_liters: 0.0,
            dropper: DropperConfig::default(),
            water_faucet: FaucetConfig::default(),
            drain_faucet: FaucetConfig::default(),
            geometry: GeometryConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Returns the validated beaker capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Capacity`] if the capacity is not strictly positive.
    pub fn capacity(&self) -> Result<Volume, ConfigError> {
        StrictlyPositive::new(Volume::new::<liter>(self.capacity_liters))
            .map(|capacity| capacity.into_inner())
            .map_err(ConfigError::Capacity)
    }

    /// Returns the solution the beaker starts with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the solute is invalid, an initial volume
    /// is negative or NaN, or the initial volumes exceed the capacity.
    pub fn initial_solution(&self) -> Result<Solution, ConfigError> {
        let capacity = self.capacity()?;
        let solute = self.solute.resolve()?;
        let solute_volume = initial_volume("solute", self.initial_solute_liters)?;
        let solvent_volume = initial_volume("solvent", self.initial_solvent_liters)?;

        let total = solute_volume + solvent_volume;
        if total > capacity {
            return Err(ConfigError::OverCapacity {
                total_liters: total.get::<liter>(),
                capacity_liters: self.capacity_liters,
            });
        }

        Ok(Solution::new(solute, solute_volume, solvent_volume))
    }

    /// Returns closed flow sources with their configured maximum rates.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a maximum rate or the reservoir volume is
    /// negative or NaN.
    pub fn flow_sources(&self) -> Result<FlowSources, ConfigError> {
        let reservoir = match self.dropper.reservoir_liters {
            Some(liters) => {
                Reservoir::finite(Volume::new::<liter>(liters)).map_err(ConfigError::Reservoir)?
            }
            None => Reservoir::unlimited(),
        };

        Ok(FlowSources {
            dropper: source(SourceRole::Dropper, self.dropper.max_rate_liters_per_second)?,
            water: source(
                SourceRole::WaterFaucet,
                self.water_faucet.max_rate_liters_per_second,
            )?,
            drain: source(
                SourceRole::DrainFaucet,
                self.drain_faucet.max_rate_liters_per_second,
            )?,
            reservoir,
        })
    }
}

fn initial_volume(which: &'static str, liters: f64) -> Result<Volume, ConfigError> {
    NonNegative::new(Volume::new::<liter>(liters))
        .map(|volume| volume.into_inner())
        .map_err(|source| ConfigError::InitialVolume { which, source })
}

fn source(role: SourceRole, max_liters_per_second: f64) -> Result<FlowSource, ConfigError> {
    FlowSource::new(
        role,
        VolumeRate::new::<liter_per_second>(max_liters_per_second),
    )
    .map_err(|source| ConfigError::MaxFlowRate { role, source })
}

/// The solute in the dropper, either a stock liquid or a custom pH.
///
/// In TOML a stock liquid is a snake-case name such as `"battery_acid"`,
/// and a custom solute is a table such as `{ custom_ph = 4.2 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SoluteSelection {
    Stock(SoluteId),
    Custom { custom_ph: f64 },
}

impl Default for SoluteSelection {
    fn default() -> Self {
        Self::Stock(SoluteId::Milk)
    }
}

impl SoluteSelection {
    /// Returns the selected solute.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CustomWithoutPh`] if the stock identifier is
    /// `custom`, or [`ConfigError::Solute`] if a custom pH is out of range.
    pub fn resolve(&self) -> Result<SoluteKind, ConfigError> {
        match *self {
            Self::Stock(id) => SoluteKind::from_id(id).ok_or(ConfigError::CustomWithoutPh),
            Self::Custom { custom_ph } => {
                SoluteKind::custom(custom_ph).map_err(ConfigError::Solute)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropperConfig {
    pub max_rate_liters_per_second: f64,

    /// Volume of solute available to the dropper, or unlimited if absent.
    pub reservoir_liters: Option<f64>,
}

impl Default for DropperConfig {
    fn default() -> Self {
        Self {
            max_rate_liters_per_second: 0.05,
            reservoir_liters: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaucetConfig {
    pub max_rate_liters_per_second: f64,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            max_rate_liters_per_second: 0.25,
        }
    }
}

/// Corners of a rectangle in centimeters, as `[x, y]` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RectConfig {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl RectConfig {
    const fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    fn build(&self, region: &'static str) -> Result<Rect, ConfigError> {
        let [x0, y0] = self.min;
        let [x1, y1] = self.max;
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Geometry {
                region,
                reason: "corners must be finite",
            });
        }

        let point = |x: f64, y: f64| {
            Point::new(Length::new::<centimeter>(x), Length::new::<centimeter>(y))
        };
        Ok(Rect::from_corners(point(x0, y0), point(x1, y1)))
    }
}

/// Layout of the beaker and the stream columns, in centimeters with `y` up.
///
/// The beaker's bottom edge is `y = 0` by default; the dropper and water
/// columns fall from above it and the drain column runs below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryConfig {
    pub beaker: RectConfig,
    pub dropper_stream: RectConfig,
    pub water_stream: RectConfig,
    pub drain_stream: RectConfig,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            beaker: RectConfig::new([0.0, 0.0], [20.0, 16.0]),
            dropper_stream: RectConfig::new([9.5, 0.0], [10.5, 40.0]),
            water_stream: RectConfig::new([2.0, 0.0], [4.0, 30.0]),
            drain_stream: RectConfig::new([16.0, -12.0], [18.0, 0.0]),
        }
    }
}

impl GeometryConfig {
    /// Converts the layout into engine geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if a corner is not finite or the
    /// beaker has no width or height.
    pub fn build(&self) -> Result<BeakerGeometry, ConfigError> {
        let beaker = self.beaker.build("beaker")?;
        if beaker.width().value <= 0.0 || beaker.height().value <= 0.0 {
            return Err(ConfigError::Geometry {
                region: "beaker",
                reason: "width and height must be positive",
            });
        }

        Ok(BeakerGeometry {
            beaker,
            dropper_stream: self.dropper_stream.build("dropper stream")?,
            water_stream: self.water_stream.build("water stream")?,
            drain_stream: self.drain_stream.build("drain stream")?,
        })
    }
}
