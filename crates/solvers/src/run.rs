//! Offline settling runs.
//!
//! [`run`] steps a [`Simulation`] with a fixed time step until it settles, an
//! observer asks it to stop, or a step limit is reached. It is the headless
//! counterpart to a ticker-driven animation, useful for tests, precomputed
//! keyframes, and tuning parameters.
//!
//! # Example
//!
//! ```
//! use tether_core::TimeStep;
//! use tether_solvers::{Scheme, Simulation, SpringParams, run};
//!
//! let sim = Simulation::new(&0.0_f64, SpringParams::basic(), Scheme::default())
//!     .with_target(&10.0)
//!     .unwrap();
//! let dt = TimeStep::from_seconds(1.0 / 120.0).unwrap();
//!
//! let solution = run::run_unobserved(sim, dt, 1_000).unwrap();
//!
//! assert_eq!(solution.status, run::Status::Settled);
//! assert_eq!(solution.value, 10.0);
//! ```

use tether_core::{Observer, Springable, TimeStep};

use crate::{Action, Event, Simulation, simulation::Error};

/// Indicates how a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The spring came to rest and was snapped onto its target.
    Settled,

    /// The step limit was reached before the spring came to rest.
    MaxSteps,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a settling run.
#[derive(Debug, Clone)]
pub struct Solution<T> {
    /// How the run terminated.
    pub status: Status,

    /// The final value, exactly the target when settled.
    pub value: T,

    /// Number of steps taken.
    pub steps: usize,

    /// Values after each step, including the start value.
    pub history: Vec<T>,
}

/// Steps `sim` until it settles, an observer stops it, or `max_steps` is hit.
///
/// # Algorithm
///
/// 1. Restart rest detection and record the start value.
/// 2. For each step:
///    - Advance the simulation by `dt` and observe rest.
///    - Emit [`Event::Moved`]; stop if the observer returns [`Action::Stop`].
///    - If settled, snap onto the target, emit [`Event::Settled`], and finish.
/// 3. Return the solution with the full history.
///
/// # Errors
///
/// Returns an error if a value cannot be rebuilt from its components.
pub fn run<T, Obs>(
    mut sim: Simulation<T>,
    dt: TimeStep,
    max_steps: usize,
    mut observer: Obs,
) -> Result<Solution<T>, Error>
where
    T: Springable + Clone,
    Obs: Observer<Event<T>, Action>,
{
    sim.restart();

    let mut value = sim.value()?;
    let mut history = Vec::with_capacity(max_steps.min(1_024) + 1);
    history.push(value.clone());

    for step in 1..=max_steps {
        let settled = sim.advance(dt);
        value = sim.value()?;

        let event = Event::Moved {
            value: value.clone(),
            tick: step,
        };
        if let Some(Action::Stop) = observer.observe(&event) {
            history.push(value.clone());
            return Ok(Solution {
                status: Status::StoppedByObserver,
                value,
                steps: step,
                history,
            });
        }

        if settled {
            sim.settle();
            value = sim.value()?;
            history.push(value.clone());

            // Settling ends the run whatever the observer answers.
            observer.observe(&Event::Settled {
                value: value.clone(),
                tick: step,
            });
            return Ok(Solution {
                status: Status::Settled,
                value,
                steps: step,
                history,
            });
        }

        history.push(value.clone());
    }

    Ok(Solution {
        status: Status::MaxSteps,
        value,
        steps: max_steps,
        history,
    })
}

/// Steps `sim` until it settles or `max_steps` is hit, without observation.
///
/// This is a convenience wrapper around [`run`] that discards events.
///
/// # Errors
///
/// Returns an error if a value cannot be rebuilt from its components.
pub fn run_unobserved<T>(
    sim: Simulation<T>,
    dt: TimeStep,
    max_steps: usize,
) -> Result<Solution<T>, Error>
where
    T: Springable + Clone,
{
    run(sim, dt, max_steps, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    use crate::{Scheme, SpringParams};

    fn hundred_twentieth() -> TimeStep {
        TimeStep::from_seconds(1.0 / 120.0).unwrap()
    }

    fn scalar(start: f64, target: f64) -> Simulation<f64> {
        Simulation::new(&start, SpringParams::basic(), Scheme::SemiImplicitEuler)
            .with_target(&target)
            .unwrap()
    }

    #[test]
    fn scalar_spring_settles_exactly_on_target() {
        let mut after_one_second = None;
        let mut settled_value = None;

        let solution = run(
            scalar(0.0, 10.0),
            hundred_twentieth(),
            10_000,
            |event: &Event<f64>| {
                match event {
                    Event::Moved { value, tick: 120 } => after_one_second = Some(*value),
                    Event::Settled { value, .. } => settled_value = Some(*value),
                    Event::Moved { .. } => {}
                }
                None
            },
        )
        .unwrap();

        assert_abs_diff_eq!(after_one_second.unwrap(), 10.0, epsilon = 0.01);
        assert_eq!(settled_value, Some(10.0));
        assert_eq!(solution.status, Status::Settled);
        assert_eq!(solution.value, 10.0);
        assert_eq!(solution.history.len(), solution.steps + 1);
        assert_eq!(solution.history.last(), Some(&10.0));
    }

    #[test]
    fn converges_from_either_side() {
        for (start, target) in [(0.0, 10.0), (10.0, -3.5), (-2.0, -2.5)] {
            let sim = scalar(start, target);
            let solution = run_unobserved(sim, hundred_twentieth(), 10_000).unwrap();

            assert_eq!(solution.status, Status::Settled);
            assert_eq!(solution.value, target);
        }
    }

    #[test]
    fn step_limit_is_reported() {
        let solution = run_unobserved(scalar(0.0, 10.0), hundred_twentieth(), 5).unwrap();

        assert_eq!(solution.status, Status::MaxSteps);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6);
        assert!(solution.value < 10.0);
    }

    #[test]
    fn observer_can_stop_without_snapping() {
        let solution = run(
            scalar(0.0, 10.0),
            hundred_twentieth(),
            10_000,
            |event: &Event<f64>| (event.tick() >= 30).then_some(Action::Stop),
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 30);
        assert!(solution.value != 10.0);
    }

    #[test]
    fn two_dimensional_point_settles() {
        let sim = Simulation::new(&[0.0_f64, 0.0], SpringParams::basic(), Scheme::ImplicitEuler)
            .with_target(&[3.0, 4.0])
            .unwrap();

        let solution = run_unobserved(sim, hundred_twentieth(), 10_000).unwrap();

        assert_eq!(solution.status, Status::Settled);
        assert_eq!(solution.value, [3.0, 4.0]);
    }

    #[test]
    fn zero_steps_returns_start() {
        let solution = run_unobserved(scalar(5.0, 10.0), hundred_twentieth(), 0).unwrap();

        assert_eq!(solution.status, Status::MaxSteps);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history, vec![5.0]);
    }
}
