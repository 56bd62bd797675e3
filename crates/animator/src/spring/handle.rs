use std::{
    fmt,
    rc::{Rc, Weak},
};

use tether_core::Springable;

use super::{CompletionCallback, RunState, Shared};
use crate::{Error, Ticker};

/// A weak, cloneable handle to a [`Spring`](super::Spring).
///
/// Handles let observers and completion callbacks drive the spring that
/// invoked them without keeping it alive. Every operation fails with
/// [`Error::Released`] once the spring has been dropped.
pub struct SpringHandle<T, K: Ticker> {
    shared: Weak<Shared<T, K>>,
}

impl<T, K> SpringHandle<T, K>
where
    T: Springable + 'static,
    K: Ticker + 'static,
{
    pub(super) fn new(shared: Weak<Shared<T, K>>) -> Self {
        Self { shared }
    }

    fn upgrade(&self) -> Result<Rc<Shared<T, K>>, Error> {
        self.shared.upgrade().ok_or(Error::Released)
    }

    /// Returns `true` while the spring is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// See [`Spring::start`](super::Spring::start).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped.
    pub fn start(&self) -> Result<(), Error> {
        Shared::start(&self.upgrade()?);
        Ok(())
    }

    /// See [`Spring::pause`](super::Spring::pause).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped.
    pub fn pause(&self) -> Result<(), Error> {
        self.upgrade()?.pause();
        Ok(())
    }

    /// See [`Spring::stop`](super::Spring::stop).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped.
    pub fn stop(&self) -> Result<(), Error> {
        self.upgrade()?.stop();
        Ok(())
    }

    /// See [`Spring::update_target_value`](super::Spring::update_target_value).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped, or
    /// [`Error::Shape`] on an arity mismatch.
    pub fn update_target_value(&self, target: &T, start_if_paused: bool) -> Result<(), Error> {
        Shared::update_target(&self.upgrade()?, target, start_if_paused)
    }

    /// See [`Spring::update_current_value`](super::Spring::update_current_value).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped, or
    /// [`Error::Shape`] on an arity mismatch.
    pub fn update_current_value(&self, value: &T) -> Result<(), Error> {
        self.upgrade()?.update_current(value)
    }

    /// See [`Spring::set_completion_callback`](super::Spring::set_completion_callback).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped.
    pub fn set_completion_callback(
        &self,
        callback: Option<CompletionCallback>,
    ) -> Result<(), Error> {
        self.upgrade()?.set_completion(callback);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped.
    pub fn run_state(&self) -> Result<RunState, Error> {
        Ok(self.upgrade()?.core.borrow().run_state)
    }

    /// # Errors
    ///
    /// Returns [`Error::Released`] if the spring has been dropped.
    pub fn value(&self) -> Result<T, Error> {
        let shared = self.upgrade()?;
        let value = shared.core.borrow().sim.value()?;
        Ok(value)
    }
}

impl<T, K: Ticker> Clone for SpringHandle<T, K> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<T, K: Ticker> fmt::Debug for SpringHandle<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpringHandle")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use uom::si::{f64::Time, time::second};

    use super::*;
    use crate::{FrameTicker, Spring};

    #[test]
    fn handle_controls_the_spring() {
        let ticker = FrameTicker::new();
        let spring = Spring::basic(ticker.clone(), 0.0_f64, ());
        let handle = spring.handle();

        handle.update_target_value(&4.0, true).unwrap();
        assert_eq!(handle.run_state().unwrap(), RunState::Running);

        handle.pause().unwrap();
        assert_eq!(spring.run_state(), RunState::Paused);

        handle.stop().unwrap();
        assert_eq!(spring.run_state(), RunState::Idle);
        assert_eq!(ticker.subscriber_count(), 0);
    }

    #[test]
    fn handle_outliving_spring_reports_release() {
        let spring = Spring::basic(FrameTicker::new(), 0.0_f64, ());
        let handle = spring.handle();
        assert!(handle.is_alive());

        drop(spring);

        assert!(!handle.is_alive());
        assert_eq!(handle.start(), Err(Error::Released));
        assert!(matches!(handle.value(), Err(Error::Released)));
    }

    #[test]
    fn completion_callback_can_restart_the_spring() {
        let ticker = FrameTicker::new();
        let spring = Spring::basic(ticker.clone(), 0.0_f64, ());
        let handle = spring.handle();
        let completions = Rc::new(Cell::new(0));

        let counter = Rc::clone(&completions);
        let restart = handle.clone();
        spring.set_completion_callback(Some(Box::new(move || {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                restart.update_target_value(&0.0, true).unwrap();
            }
        })));

        spring.update_target_value(&1.0, true).unwrap();
        for _ in 0..2_000 {
            ticker.tick(Time::new::<second>(1.0 / 60.0));
        }

        assert_eq!(completions.get(), 2);
        assert_eq!(spring.value().unwrap(), 0.0);
        assert_eq!(spring.run_state(), RunState::Idle);
    }
}
