use uom::si::f64::Time;

/// Callback invoked by a [`Ticker`] with the time elapsed since the previous
/// invocation.
pub type TickCallback = Box<dyn FnMut(Time)>;

/// A source of periodic ticks, such as a display refresh loop.
///
/// Springs subscribe while they run and unsubscribe when they stop or are
/// dropped. A ticker may deliver a fixed or a variable elapsed time per tick,
/// and may deliver invalid durations; springs reject those themselves.
///
/// Tickers are expected to deliver ticks serially on one thread. Callbacks may
/// subscribe or unsubscribe from within a tick.
pub trait Ticker {
    /// Opaque handle identifying one subscription.
    type Handle: Copy;

    /// Registers `callback` to be invoked on every tick.
    ///
    /// `interval` is the preferred time between invocations. `None` means every
    /// tick. Tickers are free to treat it as a hint.
    fn subscribe(&self, interval: Option<Time>, callback: TickCallback) -> Self::Handle;

    /// Cancels a subscription.
    ///
    /// Unsubscribing an unknown or already cancelled handle does nothing.
    fn unsubscribe(&self, handle: Self::Handle);
}
