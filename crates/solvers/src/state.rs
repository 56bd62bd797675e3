use tether_core::{ShapeMismatch, TimeStep};

use crate::{Scheme, SpringParams};

/// Position, velocity, and target of one spring, in components.
///
/// All three vectors share a length fixed at construction. Updates with a
/// different length are rejected and leave the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringState {
    position: Vec<f64>,
    velocity: Vec<f64>,
    target: Vec<f64>,
}

impl SpringState {
    /// Creates a state at rest on its own target.
    #[must_use]
    pub fn new(position: Vec<f64>) -> Self {
        let velocity = vec![0.0; position.len()];
        let target = position.clone();
        Self {
            position,
            velocity,
            target,
        }
    }

    /// Sets the initial velocity.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `velocity` has the wrong length.
    pub fn with_velocity(mut self, velocity: Vec<f64>) -> Result<Self, ShapeMismatch> {
        ShapeMismatch::check(self.arity(), velocity.len())?;
        self.velocity = velocity;
        Ok(self)
    }

    /// Sets the initial target.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `target` has the wrong length.
    pub fn with_target(mut self, target: Vec<f64>) -> Result<Self, ShapeMismatch> {
        ShapeMismatch::check(self.arity(), target.len())?;
        self.target = target;
        Ok(self)
    }

    /// Returns the number of components.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.position.len()
    }

    /// Overwrites the position, keeping velocity and target.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `position` has the wrong length.
    pub fn set_position(&mut self, position: &[f64]) -> Result<(), ShapeMismatch> {
        ShapeMismatch::check(self.arity(), position.len())?;
        self.position.copy_from_slice(position);
        Ok(())
    }

    /// Overwrites the target.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `target` has the wrong length.
    pub fn set_target(&mut self, target: &[f64]) -> Result<(), ShapeMismatch> {
        ShapeMismatch::check(self.arity(), target.len())?;
        self.target.copy_from_slice(target);
        Ok(())
    }

    /// Advances position and velocity by one step.
    pub fn step(&mut self, params: &SpringParams, dt: TimeStep, scheme: Scheme) {
        scheme.step(
            params,
            dt,
            &mut self.position,
            &mut self.velocity,
            &self.target,
        );
    }

    /// Places the spring exactly on its target with zero velocity.
    pub fn snap_to_target(&mut self) {
        self.position.copy_from_slice(&self.target);
        self.velocity.fill(0.0);
    }

    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    #[must_use]
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    #[must_use]
    pub fn target(&self) -> &[f64] {
        &self.target
    }
}
