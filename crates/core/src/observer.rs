/// Watches a spring as it moves and may steer it.
///
/// A spring hands each event (a new frame value, or the moment it settles) to
/// its observer. The returned `Option<A>` is how the observer talks back: a
/// spring driver acts on `Some(action)`, such as stopping early, and keeps
/// going on `None`.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, which covers the
/// common case of pushing each value into a UI property. Pass `()` when
/// nothing needs to watch.
pub trait Observer<E, A> {
    /// Receives one event and optionally requests an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// Ignores every event.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
