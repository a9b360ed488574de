//! Stock liquids that can be dispensed into the beaker.
//!
//! Each [`SoluteKind`] describes a concentrated, undiluted liquid by its
//! intrinsic pH and display color. The fixed catalog is exposed as constants
//! (such as [`BATTERY_ACID`] or [`MILK`]) and through [`catalog`]; any other
//! pH in `[-1, 15]` can be synthesized with [`SoluteKind::custom`].
//!
//! Solute kinds are small `Copy` values and never change after construction,
//! so a scene and its dropper can hold the same kind without sharing state.

use std::fmt;

use phscale_core::constraint::{Constrained, Constraint, ConstraintError};

use crate::{Color, conversion::NEUTRAL_PH};

/// Lowest intrinsic pH a solute may have.
pub const MIN_PH: f64 = -1.0;

/// Highest intrinsic pH a solute may have.
pub const MAX_PH: f64 = 15.0;

/// Identifies a solute in the catalog, or a caller-defined custom solute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SoluteId {
    Water,
    BatteryAcid,
    Vomit,
    SodaPop,
    OrangeJuice,
    Coffee,
    ChickenSoup,
    Milk,
    Spit,
    Blood,
    HandSoap,
    DrainCleaner,
    Custom,
}

impl SoluteId {
    /// Returns the display name of the solute.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::BatteryAcid => "battery acid",
            Self::Vomit => "vomit",
            Self::SodaPop => "soda pop",
            Self::OrangeJuice => "orange juice",
            Self::Coffee => "coffee",
            Self::ChickenSoup => "chicken soup",
            Self::Milk => "milk",
            Self::Spit => "spit",
            Self::Blood => "blood",
            Self::HandSoap => "hand soap",
            Self::DrainCleaner => "drain cleaner",
            Self::Custom => "custom",
        }
    }
}

/// Marker constraint for the intrinsic pH of a solute, `[-1, 15]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutePh;

impl Constraint<f64> for SolutePh {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if *value < MIN_PH {
            Err(ConstraintError::BelowMinimum)
        } else if *value > MAX_PH {
            Err(ConstraintError::AboveMaximum)
        } else {
            Ok(())
        }
    }
}

/// An immutable description of a stock liquid.
///
/// Deserializing rebuilds the kind from its id and pH, so a stored kind can
/// only name a catalog entry with its catalog pH or a valid custom pH. The
/// stored color is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SoluteKind {
    id: SoluteId,
    ph: f64,
    color: Color,
}

pub const WATER: SoluteKind = SoluteKind::stock(SoluteId::Water, 7.0, Color::rgb(224, 255, 255));
pub const BATTERY_ACID: SoluteKind =
    SoluteKind::stock(SoluteId::BatteryAcid, 1.0, Color::rgb(255, 255, 0));
pub const VOMIT: SoluteKind = SoluteKind::stock(SoluteId::Vomit, 2.0, Color::rgb(255, 171, 120));
pub const SODA_POP: SoluteKind =
    SoluteKind::stock(SoluteId::SodaPop, 2.5, Color::rgb(204, 255, 102));
pub const ORANGE_JUICE: SoluteKind =
    SoluteKind::stock(SoluteId::OrangeJuice, 3.5, Color::rgb(255, 180, 0));
pub const COFFEE: SoluteKind = SoluteKind::stock(SoluteId::Coffee, 5.0, Color::rgb(164, 99, 7));
pub const CHICKEN_SOUP: SoluteKind =
    SoluteKind::stock(SoluteId::ChickenSoup, 5.8, Color::rgb(255, 240, 104));
pub const MILK: SoluteKind = SoluteKind::stock(SoluteId::Milk, 6.5, Color::rgb(250, 250, 250));
pub const SPIT: SoluteKind = SoluteKind::stock(SoluteId::Spit, 7.4, Color::rgb(202, 240, 239));
pub const BLOOD: SoluteKind = SoluteKind::stock(SoluteId::Blood, 7.4, Color::rgb(211, 79, 68));
pub const HAND_SOAP: SoluteKind =
    SoluteKind::stock(SoluteId::HandSoap, 10.0, Color::rgb(224, 141, 242));
pub const DRAIN_CLEANER: SoluteKind =
    SoluteKind::stock(SoluteId::DrainCleaner, 13.0, Color::rgb(255, 255, 0));

const CATALOG: [SoluteKind; 12] = [
    WATER,
    BATTERY_ACID,
    VOMIT,
    SODA_POP,
    ORANGE_JUICE,
    COFFEE,
    CHICKEN_SOUP,
    MILK,
    SPIT,
    BLOOD,
    HAND_SOAP,
    DRAIN_CLEANER,
];

/// Returns every stock liquid in the catalog, ordered as in the solute picker.
#[must_use]
pub fn catalog() -> &'static [SoluteKind] {
    &CATALOG
}

impl SoluteKind {
    const fn stock(id: SoluteId, ph: f64, color: Color) -> Self {
        Self { id, ph, color }
    }

    /// Creates a custom solute with the given intrinsic pH.
    ///
    /// The color shades from red for strong acids through pale water at
    /// neutral to blue for strong bases.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `ph` is NaN or outside `[-1, 15]`.
    pub fn custom(ph: f64) -> Result<Self, ConstraintError> {
        let ph = Constrained::<f64, SolutePh>::new(ph)?.into_inner();

        const ACID: Color = Color::rgb(255, 40, 40);
        const BASE: Color = Color::rgb(40, 90, 255);
        let color = if ph < NEUTRAL_PH {
            ACID.blend(WATER.color, (ph - MIN_PH) / (NEUTRAL_PH - MIN_PH))
        } else {
            WATER.color.blend(BASE, (ph - NEUTRAL_PH) / (MAX_PH - NEUTRAL_PH))
        };

        Ok(Self {
            id: SoluteId::Custom,
            ph,
            color,
        })
    }

    /// Returns the catalog entry for `id`, or `None` for [`SoluteId::Custom`].
    #[must_use]
    pub fn from_id(id: SoluteId) -> Option<Self> {
        CATALOG.iter().copied().find(|kind| kind.id == id)
    }

    #[must_use]
    pub fn id(&self) -> SoluteId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Returns the pH of the undiluted liquid.
    #[must_use]
    pub fn ph(&self) -> f64 {
        self.ph
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SoluteKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        struct Stored {
            id: SoluteId,
            ph: f64,
        }

        let Stored { id, ph } = Stored::deserialize(deserializer)?;
        let kind = match Self::from_id(id) {
            Some(stock) => stock,
            None => Self::custom(ph).map_err(|error| {
                D::Error::custom(format_args!("custom solute pH {ph}: {error}"))
            })?,
        };
        if kind.ph.to_bits() != ph.to_bits() {
            return Err(D::Error::custom(format_args!(
                "{} has pH {}, not {ph}",
                kind.name(),
                kind.ph
            )));
        }
        Ok(kind)
    }
}

impl fmt::Display for SoluteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pH {})", self.name(), self.ph)
    }
}
