use tether_core::TimeStep;
use tether_solvers::{ParamsError, RestConfig, Scheme, SpringParams};
use uom::si::f64::{Frequency, Time};

/// How a spring turns ticker time into integration steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum StepPolicy {
    /// Step by the elapsed time reported with each tick.
    #[default]
    Variable,

    /// Step by a fixed amount on every tick, ignoring the reported time.
    Fixed(TimeStep),
}

/// Everything that shapes a spring's motion apart from its values.
///
/// The defaults describe the basic spring: 2.8 Hz, a 0.1 s half-life,
/// semi-implicit Euler, variable steps, and a tick on every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringConfig {
    params: SpringParams,
    scheme: Scheme,
    rest: RestConfig,
    step_policy: StepPolicy,
    interval: Option<Time>,
}

impl SpringConfig {
    /// The basic spring configuration.
    #[must_use]
    pub fn basic() -> Self {
        Self::default()
    }

    /// Derives spring parameters from a frequency and a half-life.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is zero, negative, or non-finite.
    pub fn with_tuning(self, frequency: Frequency, half_life: Time) -> Result<Self, ParamsError> {
        Ok(self.with_params(SpringParams::new(frequency, half_life)?))
    }

    #[must_use]
    pub fn with_params(mut self, params: SpringParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    #[must_use]
    pub fn with_rest(mut self, rest: RestConfig) -> Self {
        self.rest = rest;
        self
    }

    #[must_use]
    pub fn with_step_policy(mut self, step_policy: StepPolicy) -> Self {
        self.step_policy = step_policy;
        self
    }

    /// Sets the preferred time between ticks, passed to the ticker on subscribe.
    #[must_use]
    pub fn with_interval(mut self, interval: Option<Time>) -> Self {
        self.interval = interval;
        self
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
    pub fn rest(&self) -> &RestConfig {
        &self.rest
    }

    #[must_use]
    pub fn step_policy(&self) -> StepPolicy {
        self.step_policy
    }

    #[must_use]
    pub fn interval(&self) -> Option<Time> {
        self.interval
    }
}
