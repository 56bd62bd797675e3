use std::fmt;

use thiserror::Error;
use uom::{
    Conversion,
    si::{f64::Time, time},
};

/// A unit-safe, strictly positive, finite duration used to advance a spring.
///
/// `TimeStep` wraps a [`Time`] value and guarantees that every integration
/// step moves time forward by a real amount. Tick sources may report a zero,
/// negative, or non-finite duration (a stalled clock, a clock that jumped
/// backwards); those are rejected here instead of producing NaN or infinite
/// spring state.
///
/// # Construction
///
/// ```
/// use tether_core::TimeStep;
/// use uom::si::time::millisecond;
///
/// let dt = TimeStep::new::<millisecond>(8.0).unwrap();
/// assert!((dt.as_seconds() - 0.008).abs() < 1e-12);
/// ```
///
/// Or from raw seconds:
///
/// ```
/// use tether_core::TimeStep;
///
/// assert!(TimeStep::from_seconds(1.0 / 120.0).is_ok());
/// assert!(TimeStep::from_seconds(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeStep(Time);

/// Error type returned when constructing an invalid [`TimeStep`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimeStepError {
    #[error("time step must be greater than zero, got {0} s")]
    NotPositive(f64),

    #[error("time step must be finite, got {0} s")]
    NotFinite(f64),
}

impl TimeStep {
    /// Constructs a `TimeStep` from a numeric value and unit.
    ///
    /// # Errors
    ///
    /// Returns [`TimeStepError`] if `value` is not a finite, positive duration.
    pub fn new<U>(value: f64) -> Result<Self, TimeStepError>
    where
        U: time::Unit + Conversion<f64, T = f64>,
    {
        Self::from_time(Time::new::<U>(value))
    }

    /// Constructs a `TimeStep` from a duration in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeStepError`] if `seconds` is not finite and positive.
    pub fn from_seconds(seconds: f64) -> Result<Self, TimeStepError> {
        Self::new::<time::second>(seconds)
    }

    /// Constructs a `TimeStep` from an existing [`Time`] value.
    ///
    /// # Errors
    ///
    /// Returns [`TimeStepError`] if the time is not finite and positive.
    pub fn from_time(time: Time) -> Result<Self, TimeStepError> {
        let seconds = time.get::<time::second>();
        if !seconds.is_finite() {
            Err(TimeStepError::NotFinite(seconds))
        } else if seconds > 0.0 {
            Ok(Self(time))
        } else {
            Err(TimeStepError::NotPositive(seconds))
        }
    }

    /// Returns the step size in seconds.
    #[must_use]
    pub fn as_seconds(&self) -> f64 {
        self.0.get::<time::second>()
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.as_seconds())
    }
}
