//! Tick-driven spring controller.
//!
//! A [`Spring`] subscribes to a [`Ticker`] while it runs. On every tick it
//! advances its simulation, reports the new value to its observer, and once
//! the motion has come to rest it snaps exactly onto the target, stops, and
//! calls its completion callback.
//!
//! # Run states
//!
//! ```text
//!            start               pause
//!   Idle ───────────▶ Running ───────────▶ Paused
//!    ▲                 │  ▲                  │
//!    │  stop / settle  │  └──── start ───────┘
//!    └─────────────────┴──────── stop ───────┘
//! ```
//!
//! A paused spring keeps its ticker subscription but ignores ticks.
//!
//! # Re-entrancy
//!
//! Observers and completion callbacks run while the spring holds no internal
//! borrow, so they may call back into the spring through a [`SpringHandle`],
//! for example to retarget it once it settles.

mod builder;
mod handle;

pub use builder::SpringBuilder;
pub use handle::SpringHandle;

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use tether_core::{Observer, Springable, TimeStep};
use tether_solvers::{Action, Event, Simulation};
use uom::si::f64::Time;

use crate::{Error, SpringConfig, StepPolicy, Ticker};

/// Boxed observer receiving a spring's events.
pub type SpringObserver<T> = Box<dyn Observer<Event<T>, Action>>;

/// Callback invoked after a spring settles and stops.
pub type CompletionCallback = Box<dyn FnMut()>;

/// Lifecycle state of a [`Spring`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    /// Not subscribed to the ticker.
    #[default]
    Idle,

    /// Subscribed and stepping on every tick.
    Running,

    /// Subscribed, but ignoring ticks.
    Paused,
}

/// A spring animating a value of type `T`, driven by a ticker `K`.
///
/// Dropping the spring releases its ticker subscription.
pub struct Spring<T, K: Ticker> {
    shared: Rc<Shared<T, K>>,
}

struct Shared<T, K: Ticker> {
    ticker: K,
    core: RefCell<Core<T, K::Handle>>,
    observer: RefCell<Option<SpringObserver<T>>>,
    completion: RefCell<Option<CompletionCallback>>,
    completion_revision: Cell<u64>,
}

struct Core<T, H> {
    sim: Simulation<T>,
    run_state: RunState,
    subscription: Option<H>,
    step_policy: StepPolicy,
    interval: Option<Time>,
}

impl<T, K> Spring<T, K>
where
    T: Springable + 'static,
    K: Ticker + 'static,
{
    /// Creates an idle basic spring resting at `start`.
    ///
    /// The basic spring oscillates at 2.8 Hz with a 0.1 s half-life and uses
    /// semi-implicit Euler.
    pub fn basic<Obs>(ticker: K, start: T, observer: Obs) -> Self
    where
        Obs: Observer<Event<T>, Action> + 'static,
    {
        let config = SpringConfig::basic();
        let sim = Simulation::new(&start, *config.params(), config.scheme());
        Self::from_parts(ticker, sim, &config, Box::new(observer))
    }

    /// Starts building a fully configured spring resting at `start`.
    pub fn builder(start: T) -> SpringBuilder<T, K> {
        SpringBuilder::new(start)
    }

    fn from_parts(
        ticker: K,
        sim: Simulation<T>,
        config: &SpringConfig,
        observer: SpringObserver<T>,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                ticker,
                core: RefCell::new(Core {
                    sim,
                    run_state: RunState::Idle,
                    subscription: None,
                    step_policy: config.step_policy(),
                    interval: config.interval(),
                }),
                observer: RefCell::new(Some(observer)),
                completion: RefCell::new(None),
                completion_revision: Cell::new(0),
            }),
        }
    }

    /// Starts or resumes the spring.
    ///
    /// From idle, rest detection is reset and the spring subscribes to its
    /// ticker. A paused spring resumes. A running spring is left alone.
    pub fn start(&self) {
        Shared::start(&self.shared);
    }

    /// Pauses a running spring. Ticks are ignored until it is started again.
    pub fn pause(&self) {
        self.shared.pause();
    }

    /// Stops the spring where it is and releases its ticker subscription.
    ///
    /// Stopping an idle spring does nothing.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Retargets the spring.
    ///
    /// If the spring is idle and `start_if_paused` is set, it is started. A
    /// paused spring stays paused.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `target` has a different arity than the
    /// spring. The spring is left unchanged.
    pub fn update_target_value(&self, target: &T, start_if_paused: bool) -> Result<(), Error> {
        Shared::update_target(&self.shared, target, start_if_paused)
    }

    /// Moves the spring to `value` without changing its velocity, target, or
    /// run state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `value` has a different arity than the
    /// spring. The spring is left unchanged.
    pub fn update_current_value(&self, value: &T) -> Result<(), Error> {
        self.shared.update_current(value)
    }

    /// Replaces or clears the completion callback.
    pub fn set_completion_callback(&self, callback: Option<CompletionCallback>) {
        self.shared.set_completion(callback);
    }

    /// Returns a weak handle for controlling the spring from its own callbacks.
    #[must_use]
    pub fn handle(&self) -> SpringHandle<T, K> {
        SpringHandle::new(Rc::downgrade(&self.shared))
    }

    /// Returns the current value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] only if `T` cannot rebuild itself from its own
    /// components.
    pub fn value(&self) -> Result<T, Error> {
        Ok(self.shared.core.borrow().sim.value()?)
    }

    /// Returns the current target.
    ///
    /// # Errors
    ///
    /// See [`Spring::value`].
    pub fn target(&self) -> Result<T, Error> {
        Ok(self.shared.core.borrow().sim.target()?)
    }

    /// Returns the current velocity, per component, as a value of `T`.
    ///
    /// # Errors
    ///
    /// See [`Spring::value`].
    pub fn velocity(&self) -> Result<T, Error> {
        Ok(self.shared.core.borrow().sim.velocity()?)
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.shared.core.borrow().run_state
    }

    /// Returns `true` if rest detection currently reports the spring settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.shared.core.borrow().sim.is_settled()
    }
}

impl<T, K> Shared<T, K>
where
    T: Springable + 'static,
    K: Ticker + 'static,
{
    fn start(this: &Rc<Self>) {
        let interval = {
            let mut core = this.core.borrow_mut();
            match core.run_state {
                RunState::Running => return,
                RunState::Paused => {
                    core.run_state = RunState::Running;
                    tracing::debug!("spring resumed");
                    return;
                }
                RunState::Idle => {
                    core.sim.restart();
                    core.run_state = RunState::Running;
                    core.interval
                }
            }
        };

        let weak = Rc::downgrade(this);
        let handle = this.ticker.subscribe(
            interval,
            Box::new(move |elapsed: Time| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_tick(elapsed);
                }
            }),
        );

        // The ticker may already have stepped the spring to completion.
        let mut core = this.core.borrow_mut();
        if core.run_state == RunState::Running && core.subscription.is_none() {
            core.subscription = Some(handle);
            drop(core);
            tracing::debug!("spring started");
        } else {
            drop(core);
            this.ticker.unsubscribe(handle);
        }
    }

    fn pause(&self) {
        let mut core = self.core.borrow_mut();
        if core.run_state == RunState::Running {
            core.run_state = RunState::Paused;
            tracing::debug!("spring paused");
        }
    }

    fn stop(&self) {
        let subscription = {
            let mut core = self.core.borrow_mut();
            if core.run_state == RunState::Idle {
                return;
            }
            core.run_state = RunState::Idle;
            core.sim.restart();
            core.subscription.take()
        };

        if let Some(handle) = subscription {
            self.ticker.unsubscribe(handle);
        }
        tracing::debug!("spring stopped");
    }

    fn update_target(this: &Rc<Self>, target: &T, start_if_paused: bool) -> Result<(), Error> {
        let run_state = {
            let mut core = this.core.borrow_mut();
            core.sim.set_target(target)?;
            core.run_state
        };
        tracing::trace!(?run_state, "spring retargeted");

        if start_if_paused && run_state == RunState::Idle {
            Self::start(this);
        }
        Ok(())
    }

    fn update_current(&self, value: &T) -> Result<(), Error> {
        self.core.borrow_mut().sim.set_current(value)?;
        Ok(())
    }

    fn set_completion(&self, callback: Option<CompletionCallback>) {
        self.completion_revision
            .set(self.completion_revision.get().wrapping_add(1));
        *self.completion.borrow_mut() = callback;
    }

    fn on_tick(&self, elapsed: Time) {
        let Ok(mut core) = self.core.try_borrow_mut() else {
            tracing::warn!("spring ticked while already stepping, tick ignored");
            return;
        };
        if core.run_state != RunState::Running {
            return;
        }

        let dt = match core.step_policy {
            StepPolicy::Variable => TimeStep::from_time(elapsed),
            StepPolicy::Fixed(step) => Ok(step),
        };
        let dt = match dt {
            Ok(dt) => dt,
            Err(err) => {
                tracing::warn!(%err, "rejected tick");
                return;
            }
        };

        let settled = core.sim.advance(dt);
        let tick = core.sim.ticks();
        let revision = core.sim.target_revision();
        let value = core.sim.value();
        drop(core);

        let value = match value {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%err, "could not rebuild spring value");
                return;
            }
        };
        tracing::trace!(tick, %dt, settled, "spring stepped");

        if let Some(Action::Stop) = self.emit(&Event::Moved { value, tick }) {
            tracing::debug!(tick, "observer stopped spring");
            self.stop();
            return;
        }

        if settled {
            self.settle(revision, tick);
        }
    }

    fn settle(&self, revision: u64, tick: usize) {
        let value = {
            let mut core = self.core.borrow_mut();
            // Retargeted, paused, or stopped by the observer since the step.
            if core.run_state != RunState::Running || core.sim.target_revision() != revision {
                return;
            }
            core.sim.settle();
            core.sim.value()
        };
        let value = match value {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%err, "could not rebuild spring target");
                return;
            }
        };
        tracing::debug!(tick, "spring settled");

        self.emit(&Event::Settled { value, tick });

        {
            let mut core = self.core.borrow_mut();
            if core.sim.target_revision() != revision {
                if core.run_state == RunState::Running {
                    core.sim.restart();
                }
                tracing::debug!("spring retargeted while settling, continuing");
                return;
            }
        }

        self.stop();
        self.complete();
    }

    fn emit(&self, event: &Event<T>) -> Option<Action> {
        // Absent while the observer is already running further up the stack.
        let observer = self.observer.borrow_mut().take();
        let mut observer = observer?;
        let action = observer.observe(event);
        *self.observer.borrow_mut() = Some(observer);
        action
    }

    fn complete(&self) {
        let callback = self.completion.borrow_mut().take();
        let Some(mut callback) = callback else {
            return;
        };

        let revision = self.completion_revision.get();
        callback();
        if self.completion_revision.get() == revision {
            *self.completion.borrow_mut() = Some(callback);
        }
    }
}

impl<T, K: Ticker> Drop for Spring<T, K> {
    fn drop(&mut self) {
        let subscription = match self.shared.core.try_borrow_mut() {
            Ok(mut core) => {
                core.run_state = RunState::Idle;
                core.subscription.take()
            }
            Err(_) => None,
        };

        if let Some(handle) = subscription {
            self.shared.ticker.unsubscribe(handle);
            tracing::debug!("spring dropped, subscription released");
        }
    }
}

impl<T, K: Ticker> Drop for Shared<T, K> {
    fn drop(&mut self) {
        if let Some(handle) = self.core.get_mut().subscription.take() {
            self.ticker.unsubscribe(handle);
        }
    }
}

impl<T: Springable, K: Ticker> fmt::Debug for Spring<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Spring");
        if let Ok(core) = self.shared.core.try_borrow() {
            debug
                .field("run_state", &core.run_state)
                .field("arity", &core.sim.state().arity())
                .field("ticks", &core.sim.ticks())
                .field("settled", &core.sim.is_settled());
        }
        debug.finish_non_exhaustive()
    }
}
