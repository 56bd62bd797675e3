//! A manually driven [`Ticker`] backed by a slot map.
//!
//! [`FrameTicker`] is the tick source for hosts that own their frame loop:
//! call [`FrameTicker::tick`] with the frame time, or [`FrameTicker::tick_now`]
//! to measure it from the wall clock.

use std::{cell::RefCell, fmt, rc::Rc, time::Instant};

use slotmap::{SlotMap, new_key_type};
use uom::si::{f64::Time, time::second};

use crate::{TickCallback, Ticker};

new_key_type! {
    /// Identifies one subscription on a [`FrameTicker`].
    pub struct SubscriptionId;
}

/// Shareable frame-driven ticker.
///
/// Clones share the same set of subscriptions.
#[derive(Clone, Default)]
pub struct FrameTicker {
    inner: Rc<RefCell<Registry>>,
}

#[derive(Default)]
struct Registry {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    last_instant: Option<Instant>,
}

struct Subscription {
    interval: Option<Time>,
    elapsed: Time,
    callback: Rc<RefCell<TickCallback>>,
}

impl FrameTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every subscription by `dt` and invokes those that are due.
    ///
    /// A subscription without an interval is due on every tick. One with an
    /// interval accumulates elapsed time and is invoked with the accumulated
    /// total once it reaches the interval.
    ///
    /// A `dt` that is not finite and positive is still passed to subscriptions
    /// without an interval, but never accumulated by those with one.
    ///
    /// Subscriptions added during dispatch are first invoked on the next tick.
    /// Subscriptions cancelled during dispatch are not invoked.
    ///
    /// Returns the number of callbacks invoked.
    pub fn tick(&self, dt: Time) -> usize {
        let seconds = dt.get::<second>();
        let accumulates = seconds.is_finite() && seconds > 0.0;
        if !accumulates {
            tracing::warn!(dt = seconds, "frame time not accumulated");
        }

        let due: Vec<_> = {
            let mut registry = self.inner.borrow_mut();
            registry
                .subscriptions
                .iter_mut()
                .filter_map(|(id, sub)| {
                    let Some(interval) = sub.interval else {
                        return Some((id, dt, Rc::clone(&sub.callback)));
                    };
                    if !accumulates {
                        return None;
                    }
                    sub.elapsed += dt;
                    if sub.elapsed < interval {
                        return None;
                    }
                    let elapsed = std::mem::replace(&mut sub.elapsed, zero());
                    Some((id, elapsed, Rc::clone(&sub.callback)))
                })
                .collect()
        };

        let mut invoked = 0;
        for (id, elapsed, callback) in due {
            if !self.is_subscribed(id) {
                continue;
            }

            // A callback that ticks this ticker again is skipped while busy.
            let Ok(mut callback) = callback.try_borrow_mut() else {
                continue;
            };
            (*callback)(elapsed);
            invoked += 1;
        }

        invoked
    }

    /// Ticks with the wall-clock time elapsed since the previous call.
    ///
    /// The first call only records the current instant and invokes nothing.
    pub fn tick_now(&self) -> usize {
        let now = Instant::now();
        let previous = self.inner.borrow_mut().last_instant.replace(now);

        match previous {
            Some(previous) => {
                let dt = Time::new::<second>((now - previous).as_secs_f64());
                self.tick(dt)
            }
            None => 0,
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscriptions.len()
    }

    /// Returns `true` if `id` refers to a live subscription.
    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner.borrow().subscriptions.contains_key(id)
    }
}

impl Ticker for FrameTicker {
    type Handle = SubscriptionId;

    fn subscribe(&self, interval: Option<Time>, callback: TickCallback) -> SubscriptionId {
        let id = self.inner.borrow_mut().subscriptions.insert(Subscription {
            interval,
            elapsed: zero(),
            callback: Rc::new(RefCell::new(callback)),
        });
        tracing::trace!(?id, "ticker subscription added");
        id
    }

    fn unsubscribe(&self, handle: SubscriptionId) {
        // Bind first so the registry borrow ends before the callback drops.
        let removed = self.inner.borrow_mut().subscriptions.remove(handle);
        if removed.is_some() {
            tracing::trace!(id = ?handle, "ticker subscription removed");
        }
    }
}

impl fmt::Debug for FrameTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTicker")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl PartialEq for FrameTicker {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for FrameTicker {}

fn zero() -> Time {
    Time::new::<second>(0.0)
}
