//! Physical spring constants derived from tuning knobs.
//!
//! Users describe a spring by how fast it oscillates and how quickly the
//! oscillation dies out:
//!
//! ```text
//! ω = 2π·f
//! ζ = -ln(0.5) / (ω·λ)
//! ```
//!
//! where `f` is the oscillation frequency and `λ` the half-life, the time for
//! the oscillation amplitude to decay by half.

use std::f64::consts::{LN_2, TAU};

use thiserror::Error;
use uom::si::{
    f64::{Frequency, Time},
    frequency::hertz,
    time::second,
};

/// Oscillation frequency of the basic spring, in hertz.
const BASIC_FREQUENCY_HZ: f64 = 2.8;

/// Half-life of the basic spring, in seconds.
const BASIC_HALF_LIFE_S: f64 = 0.1;

/// Angular frequency and damping ratio of a spring.
///
/// Parameters are immutable once derived. A spring with non-physical
/// parameters cannot be simulated, so construction validates its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringParams {
    angular_frequency: f64,
    damping_ratio: f64,
}

/// Errors that can occur when deriving spring parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParamsError {
    #[error("oscillation frequency must be finite and positive, got {0} Hz")]
    Frequency(f64),

    #[error("half-life must be finite and positive, got {0} s")]
    HalfLife(f64),
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::basic()
    }
}

impl SpringParams {
    /// Derives parameters from an oscillation frequency and a half-life.
    ///
    /// # Errors
    ///
    /// Returns an error if either input is zero, negative, or non-finite.
    pub fn new(frequency: Frequency, half_life: Time) -> Result<Self, ParamsError> {
        Self::from_si(frequency.get::<hertz>(), half_life.get::<second>())
    }

    /// Derives parameters from raw SI values (Hz and s).
    ///
    /// # Errors
    ///
    /// Returns an error if either input is zero, negative, or non-finite.
    pub fn from_si(frequency_hz: f64, half_life_s: f64) -> Result<Self, ParamsError> {
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
            return Err(ParamsError::Frequency(frequency_hz));
        }
        if !half_life_s.is_finite() || half_life_s <= 0.0 {
            return Err(ParamsError::HalfLife(half_life_s));
        }

        let angular_frequency = TAU * frequency_hz;
        let damping_ratio = LN_2 / (angular_frequency * half_life_s);

        Ok(Self {
            angular_frequency,
            damping_ratio,
        })
    }

    /// The basic spring: 2.8 Hz with a 0.1 s half-life.
    ///
    /// Lightly underdamped, so it settles quickly with a small overshoot.
    #[must_use]
    pub fn basic() -> Self {
        let angular_frequency = TAU * BASIC_FREQUENCY_HZ;
        Self {
            angular_frequency,
            damping_ratio: LN_2 / (angular_frequency * BASIC_HALF_LIFE_S),
        }
    }

    /// Returns the angular frequency `ω` in rad/s.
    #[must_use]
    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// Returns the dimensionless damping ratio `ζ`.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Returns the oscillation frequency these parameters were derived from.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        Frequency::new::<hertz>(self.angular_frequency / TAU)
    }

    /// Returns the half-life these parameters were derived from.
    #[must_use]
    pub fn half_life(&self) -> Time {
        Time::new::<second>(LN_2 / (self.angular_frequency * self.damping_ratio))
    }
}
