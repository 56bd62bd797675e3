//! A spring simulation over a user-typed value.
//!
//! [`Simulation`] owns the component-level [`SpringState`] and
//! [`RestDetector`] and marshals values of `T` in and out through
//! [`Springable`]. Its arity is fixed by the start value.

use std::marker::PhantomData;

use thiserror::Error;
use tether_core::{ShapeMismatch, Springable, TimeStep, TimeStepError};
use uom::si::f64::Time;

use crate::{RestConfig, RestDetector, Scheme, SpringParams, SpringState};

/// Errors that can occur while configuring or stepping a [`Simulation`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeMismatch),

    #[error(transparent)]
    TimeStep(#[from] TimeStepError),
}

/// A damped spring driving a value of type `T` toward a target.
#[derive(Debug, Clone)]
pub struct Simulation<T> {
    state: SpringState,
    params: SpringParams,
    scheme: Scheme,
    rest: RestDetector,
    ticks: usize,
    target_revision: u64,
    _value: PhantomData<fn() -> T>,
}

impl<T: Springable> Simulation<T> {
    /// Creates a simulation at rest on `start`, targeting `start`.
    #[must_use]
    pub fn new(start: &T, params: SpringParams, scheme: Scheme) -> Self {
        Self {
            state: SpringState::new(start.to_components()),
            params,
            scheme,
            rest: RestDetector::default(),
            ticks: 0,
            target_revision: 0,
            _value: PhantomData,
        }
    }

    /// Sets the initial velocity.
    ///
    /// # Errors
    ///
    /// Returns an error if `velocity` has a different arity than the start value.
    pub fn with_velocity(mut self, velocity: &T) -> Result<Self, Error> {
        self.state = self.state.with_velocity(velocity.to_components())?;
        Ok(self)
    }

    /// Sets the initial target.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` has a different arity than the start value.
    pub fn with_target(mut self, target: &T) -> Result<Self, Error> {
        self.state = self.state.with_target(target.to_components())?;
        Ok(self)
    }

    /// Replaces the rest detection settings.
    #[must_use]
    pub fn with_rest(mut self, config: RestConfig) -> Self {
        self.rest = RestDetector::new(config);
        self
    }

    /// Moves the spring to `value` without changing its velocity or target.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` has a different arity; the simulation is
    /// left unchanged.
    pub fn set_current(&mut self, value: &T) -> Result<(), Error> {
        self.state.set_position(&value.to_components())?;
        Ok(())
    }

    /// Retargets the spring.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` has a different arity; the simulation is
    /// left unchanged.
    pub fn set_target(&mut self, target: &T) -> Result<(), Error> {
        self.state.set_target(&target.to_components())?;
        self.target_revision = self.target_revision.wrapping_add(1);
        Ok(())
    }

    /// Advances the spring by one step and returns whether it has settled.
    pub fn advance(&mut self, dt: TimeStep) -> bool {
        self.state.step(&self.params, dt, self.scheme);
        self.ticks += 1;
        self.rest.observe(self.state.position())
    }

    /// Validates `dt` and advances the spring by one step.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not finite and positive; the simulation is
    /// left unchanged.
    pub fn try_advance(&mut self, dt: Time) -> Result<bool, Error> {
        let dt = TimeStep::from_time(dt)?;
        Ok(self.advance(dt))
    }

    /// Snaps the spring exactly onto its target with zero velocity.
    pub fn settle(&mut self) {
        self.state.snap_to_target();
    }

    /// Clears rest detection and the step counter.
    pub fn restart(&mut self) {
        self.rest.reset();
        self.ticks = 0;
    }

    /// Returns the current value.
    ///
    /// # Errors
    ///
    /// Returns an error only if `T`'s [`Springable`] implementation cannot
    /// rebuild a value from the arity it produced.
    pub fn value(&self) -> Result<T, ShapeMismatch> {
        T::from_components(self.state.position())
    }

    /// Returns the current target.
    ///
    /// # Errors
    ///
    /// See [`Simulation::value`].
    pub fn target(&self) -> Result<T, ShapeMismatch> {
        T::from_components(self.state.target())
    }

    /// Returns the current velocity, per component, as a value of `T`.
    ///
    /// # Errors
    ///
    /// See [`Simulation::value`].
    pub fn velocity(&self) -> Result<T, ShapeMismatch> {
        T::from_components(self.state.velocity())
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.rest.is_settled()
    }

    /// Returns the number of steps taken since creation or the last restart.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Returns a counter that changes every time the target is set.
    #[must_use]
    pub fn target_revision(&self) -> u64 {
        self.target_revision
    }

    #[must_use]
    pub fn state(&self) -> &SpringState {
        &self.state
    }

    #[must_use]
    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    #[must_use]
    pub fn rest(&self) -> &RestDetector {
        &self.rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use uom::si::time::{millisecond, second};

    fn point_sim() -> Simulation<(f64, f64)> {
        Simulation::new(&(0.0, 0.0), SpringParams::basic(), Scheme::default())
            .with_target(&(3.0, 4.0))
            .unwrap()
    }

    #[test]
    fn drives_a_typed_point() {
        let mut sim = point_sim();
        let dt = TimeStep::from_seconds(1.0 / 60.0).unwrap();

        let mut settled = false;
        for _ in 0..1_000 {
            if sim.advance(dt) {
                settled = true;
                break;
            }
        }
        assert!(settled);

        let (x, y) = sim.value().unwrap();
        assert_abs_diff_eq!(x, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(y, 4.0, epsilon = 1e-4);

        sim.settle();
        assert_eq!(sim.value().unwrap(), (3.0, 4.0));
        assert_eq!(sim.velocity().unwrap(), (0.0, 0.0));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let mut sim: Simulation<Vec<f64>> =
            Simulation::new(&vec![0.0, 0.0], SpringParams::basic(), Scheme::default());

        let err = sim.set_target(&vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::Shape(ShapeMismatch::Length {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(sim.target().unwrap(), vec![0.0, 0.0]);
        assert_eq!(sim.target_revision(), 0);

        assert!(sim.with_velocity(&vec![1.0]).is_err());
    }

    #[test]
    fn invalid_time_step_changes_nothing() {
        let mut sim = point_sim();

        let err = sim.try_advance(Time::new::<second>(0.0)).unwrap_err();
        assert!(matches!(err, Error::TimeStep(TimeStepError::NotPositive(_))));
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.value().unwrap(), (0.0, 0.0));

        assert!(sim.try_advance(Time::new::<second>(f64::NAN)).is_err());
        assert!(sim.try_advance(Time::new::<millisecond>(16.0)).is_ok());
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn retargeting_bumps_revision() {
        let mut sim = point_sim();
        let before = sim.target_revision();

        sim.set_target(&(1.0, 1.0)).unwrap();

        assert_ne!(sim.target_revision(), before);
        assert_eq!(sim.target().unwrap(), (1.0, 1.0));
    }

    #[test]
    fn restart_clears_rest_and_ticks() {
        let mut sim = Simulation::new(&5.0_f64, SpringParams::basic(), Scheme::ImplicitEuler)
            .with_rest(RestConfig::new(1e-5, 1).unwrap());
        let dt = TimeStep::from_seconds(0.01).unwrap();

        sim.advance(dt);
        assert!(sim.advance(dt));
        assert_eq!(sim.ticks(), 2);

        sim.restart();

        assert!(!sim.is_settled());
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.rest().consecutive_rests(), 0);
    }

    #[test]
    fn set_current_keeps_velocity() {
        let mut sim = Simulation::new(&0.0_f64, SpringParams::basic(), Scheme::default())
            .with_velocity(&2.0)
            .unwrap();

        sim.set_current(&7.0).unwrap();

        assert_eq!(sim.value().unwrap(), 7.0);
        assert_eq!(sim.velocity().unwrap(), 2.0);
    }
}
