//! Rest detection for stepped springs.
//!
//! A spring is considered settled once its position has stayed within a small
//! epsilon of a reference position for a number of consecutive observations.
//! The reference is only replaced when the spring moves, so slow drift that
//! never exceeds epsilon in a single step still accumulates against it.

use thiserror::Error;

/// Default per-component movement threshold.
const DEFAULT_EPSILON: f64 = 1e-5;

/// Default number of consecutive rests before a spring counts as settled.
const DEFAULT_RESTS: usize = 3;

/// Configuration for [`RestDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestConfig {
    epsilon: f64,
    rests_for_completion: usize,
}

/// Errors that can occur when creating a [`RestConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RestConfigError {
    #[error("epsilon must be finite and positive, got {0}")]
    Epsilon(f64),

    #[error("at least one rest is required for completion")]
    RestCount,
}

impl RestConfig {
    /// Creates a new rest configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is not finite and positive, or if
    /// `rests_for_completion` is zero.
    pub fn new(epsilon: f64, rests_for_completion: usize) -> Result<Self, RestConfigError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(RestConfigError::Epsilon(epsilon));
        }
        if rests_for_completion == 0 {
            return Err(RestConfigError::RestCount);
        }

        Ok(Self {
            epsilon,
            rests_for_completion,
        })
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn rests_for_completion(&self) -> usize {
        self.rests_for_completion
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            rests_for_completion: DEFAULT_RESTS,
        }
    }
}

/// Tracks consecutive near-stationary observations of a spring's position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestDetector {
    config: RestConfig,
    previous: Option<Vec<f64>>,
    consecutive_rests: usize,
}

impl RestDetector {
    #[must_use]
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            previous: None,
            consecutive_rests: 0,
        }
    }

    /// Records a new position and returns whether the spring has settled.
    ///
    /// The first observation after a reset only stores the position.
    pub fn observe(&mut self, position: &[f64]) -> bool {
        let Some(previous) = self.previous.as_mut() else {
            self.previous = Some(position.to_vec());
            return false;
        };

        let at_rest = previous.len() == position.len()
            && previous
                .iter()
                .zip(position)
                .all(|(p, x)| (p - x).abs() < self.config.epsilon);

        if at_rest {
            self.consecutive_rests += 1;
        } else {
            previous.clear();
            previous.extend_from_slice(position);
            self.consecutive_rests = 0;
        }

        self.is_settled()
    }

    /// Forgets the stored position and clears the rest counter.
    pub fn reset(&mut self) {
        self.previous = None;
        self.consecutive_rests = 0;
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.consecutive_rests >= self.config.rests_for_completion
    }

    #[must_use]
    pub fn consecutive_rests(&self) -> usize {
        self.consecutive_rests
    }

    #[must_use]
    pub fn config(&self) -> &RestConfig {
        &self.config
    }
}
