use std::marker::PhantomData;

use tether_core::{Observer, Springable};
use tether_solvers::{Action, Event, RestConfig, Scheme, Simulation, SpringParams};
use uom::si::f64::{Frequency, Time};

use super::{CompletionCallback, Spring};
use crate::{Error, SpringConfig, StepPolicy, Ticker};

/// Builder for a fully configured [`Spring`].
///
/// Every setting defaults to the basic spring. Values are validated when the
/// spring is built, so a misconfigured builder fails as a whole.
///
/// ```
/// use tether_animator::{FrameTicker, RunState, Spring};
/// use tether_solvers::Scheme;
/// use uom::si::{f64::{Frequency, Time}, frequency::hertz, time::second};
///
/// let spring = Spring::builder((0.0_f64, 0.0_f64))
///     .target((3.0, 4.0))
///     .tuning(Frequency::new::<hertz>(4.0), Time::new::<second>(0.15))
///     .scheme(Scheme::ImplicitEuler)
///     .build(FrameTicker::new(), ())
///     .unwrap();
///
/// assert_eq!(spring.run_state(), RunState::Idle);
/// assert_eq!(spring.target().unwrap(), (3.0, 4.0));
/// ```
pub struct SpringBuilder<T, K> {
    start: T,
    velocity: Option<T>,
    target: Option<T>,
    tuning: Option<(Frequency, Time)>,
    config: SpringConfig,
    completion: Option<CompletionCallback>,
    _ticker: PhantomData<fn() -> K>,
}

impl<T, K> SpringBuilder<T, K>
where
    T: Springable + 'static,
    K: Ticker + 'static,
{
    pub(super) fn new(start: T) -> Self {
        Self {
            start,
            velocity: None,
            target: None,
            tuning: None,
            config: SpringConfig::basic(),
            completion: None,
            _ticker: PhantomData,
        }
    }

    /// Sets the initial velocity. Defaults to zero.
    #[must_use]
    pub fn velocity(mut self, velocity: T) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Sets the initial target. Defaults to the start value.
    #[must_use]
    pub fn target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the oscillation frequency and half-life, validated on build.
    #[must_use]
    pub fn tuning(mut self, frequency: Frequency, half_life: Time) -> Self {
        self.tuning = Some((frequency, half_life));
        self
    }

    /// Sets already derived spring parameters, replacing any tuning.
    #[must_use]
    pub fn params(mut self, params: SpringParams) -> Self {
        self.tuning = None;
        self.config = self.config.with_params(params);
        self
    }

    #[must_use]
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.config = self.config.with_scheme(scheme);
        self
    }

    #[must_use]
    pub fn rest(mut self, rest: RestConfig) -> Self {
        self.config = self.config.with_rest(rest);
        self
    }

    #[must_use]
    pub fn step_policy(mut self, step_policy: StepPolicy) -> Self {
        self.config = self.config.with_step_policy(step_policy);
        self
    }

    /// Sets the preferred time between ticks, passed to the ticker.
    #[must_use]
    pub fn interval(mut self, interval: Time) -> Self {
        self.config = self.config.with_interval(Some(interval));
        self
    }

    /// Replaces every motion setting at once.
    #[must_use]
    pub fn config(mut self, config: SpringConfig) -> Self {
        self.tuning = None;
        self.config = config;
        self
    }

    #[must_use]
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.completion = Some(Box::new(callback));
        self
    }

    /// Builds an idle spring driven by `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Params`] if the tuning is invalid, or [`Error::Shape`]
    /// if the velocity or target arity differs from the start value.
    pub fn build<Obs>(self, ticker: K, observer: Obs) -> Result<Spring<T, K>, Error>
    where
        Obs: Observer<Event<T>, Action> + 'static,
    {
        let config = match self.tuning {
            Some((frequency, half_life)) => self.config.with_tuning(frequency, half_life)?,
            None => self.config,
        };

        let mut sim = Simulation::new(&self.start, *config.params(), config.scheme())
            .with_rest(*config.rest());
        if let Some(velocity) = &self.velocity {
            sim = sim.with_velocity(velocity)?;
        }
        if let Some(target) = &self.target {
            sim = sim.with_target(target)?;
        }

        let spring = Spring::from_parts(ticker, sim, &config, Box::new(observer));
        spring.set_completion_callback(self.completion);
        Ok(spring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{frequency::hertz, time::second};

    use crate::{FrameTicker, RunState};

    #[test]
    fn defaults_match_basic_spring() {
        let spring = Spring::builder(2.0_f64)
            .build(FrameTicker::new(), ())
            .unwrap();

        assert_eq!(spring.run_state(), RunState::Idle);
        assert_eq!(spring.value().unwrap(), 2.0);
        assert_eq!(spring.target().unwrap(), 2.0);
        assert_eq!(spring.velocity().unwrap(), 0.0);
    }

    #[test]
    fn invalid_tuning_fails_the_build() {
        let result = Spring::builder(0.0_f64)
            .tuning(Frequency::new::<hertz>(2.0), Time::new::<second>(0.0))
            .build(FrameTicker::new(), ());

        assert!(matches!(result, Err(Error::Params(_))));
    }

    #[test]
    fn params_override_earlier_tuning() {
        let result = Spring::builder(0.0_f64)
            .tuning(Frequency::new::<hertz>(-2.0), Time::new::<second>(0.1))
            .params(SpringParams::basic())
            .build(FrameTicker::new(), ());

        assert!(result.is_ok());
    }

    #[test]
    fn mismatched_target_fails_the_build() {
        let result = Spring::builder(vec![0.0_f64, 0.0])
            .target(vec![3.0, 4.0, 5.0])
            .build(FrameTicker::new(), ());

        assert!(matches!(result, Err(Error::Shape(_))));
    }

    #[test]
    fn velocity_is_applied() {
        let spring = Spring::builder([0.0_f64, 0.0])
            .velocity([1.0, -1.0])
            .build(FrameTicker::new(), ())
            .unwrap();

        assert_eq!(spring.velocity().unwrap(), [1.0, -1.0]);
    }
}
