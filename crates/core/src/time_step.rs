use std::{fmt, ops::Deref};

use thiserror::Error;
use uom::{
    Conversion, ConstZero,
    si::{f64::Time, time},
};

/// A unit-safe, non-negative duration used to advance the beaker simulation.
///
/// A zero step is valid and leaves volumes unchanged, which lets a driver
/// re-derive faucet and dropper enablement without advancing time.
///
/// # Construction
///
/// ```
/// use phscale_core::TimeStep;
/// use uom::si::time::second;
///
/// let dt = TimeStep::new::<second>(0.1).unwrap();
/// assert_eq!(dt.to_string(), "0.1 s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeStep(Time);

/// Error type returned when constructing an invalid [`TimeStep`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimeStepError {
    #[error("time step must not be negative, got {0} s")]
    Negative(f64),
    #[error("time step is not a number")]
    NotANumber,
}

impl TimeStep {
    /// A step of zero duration.
    pub const ZERO: Self = Self(Time::ZERO);

    /// Constructs a `TimeStep` from a numeric value and unit.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeStepError`] if `value` is negative or NaN.
    pub fn new<U>(value: f64) -> Result<Self, TimeStepError>
    where
        U: time::Unit + Conversion<f64, T = f64>,
    {
        Self::from_time(Time::new::<U>(value))
    }

    /// Constructs a `TimeStep` from an existing [`Time`] value.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeStepError`] if the time is negative or NaN.
    pub fn from_time(time: Time) -> Result<Self, TimeStepError> {
        let seconds = time.get::<time::second>();
        if seconds.is_nan() {
            Err(TimeStepError::NotANumber)
        } else if seconds < 0.0 {
            Err(TimeStepError::Negative(seconds))
        } else {
            Ok(Self(time))
        }
    }

    /// Consumes the `TimeStep` and returns the underlying [`Time`] value.
    #[must_use]
    pub fn into_inner(self) -> Time {
        self.0
    }

    /// Returns `true` if the step has zero duration.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Time::ZERO
    }
}

impl TryFrom<Time> for TimeStep {
    type Error = TimeStepError;
    fn try_from(t: Time) -> Result<Self, Self::Error> {
        Self::from_time(t)
    }
}

impl Deref for TimeStep {
    type Target = Time;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.get::<time::second>();
        write!(f, "{s} s")
    }
}
