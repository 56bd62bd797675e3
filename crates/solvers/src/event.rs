/// An event emitted while a spring is being stepped.
///
/// Events carry the user-typed value so observers never handle raw components.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    /// The spring advanced one step and now sits at `value`.
    Moved { value: T, tick: usize },

    /// The spring came to rest and was snapped exactly onto its target.
    Settled { value: T, tick: usize },
}

impl<T> Event<T> {
    /// Returns the value carried by the event.
    pub fn value(&self) -> &T {
        match self {
            Event::Moved { value, .. } | Event::Settled { value, .. } => value,
        }
    }

    /// Returns the number of steps taken when the event was emitted.
    pub fn tick(&self) -> usize {
        match self {
            Event::Moved { tick, .. } | Event::Settled { tick, .. } => *tick,
        }
    }

    /// Returns `true` for [`Event::Settled`].
    pub fn is_settled(&self) -> bool {
        matches!(self, Event::Settled { .. })
    }
}

/// An action an observer may request in response to an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop stepping at the current position without snapping to the target.
    Stop,
}
