//! Tick-driven spring animation for the Tether framework.
//!
//! A [`Spring`] animates any [`Springable`] value toward a target. It is
//! driven by a [`Ticker`], typically a display refresh loop, and reports every
//! new value to an [`Observer`]. Once the motion comes to rest the spring
//! lands exactly on its target, stops, and calls an optional completion
//! callback.
//!
//! # Example
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//!
//! use tether_animator::{Event, FrameTicker, RunState, Spring};
//! use uom::si::{f64::Time, time::second};
//!
//! let ticker = FrameTicker::new();
//! let latest = Rc::new(Cell::new(0.0));
//! let sink = Rc::clone(&latest);
//!
//! let spring = Spring::basic(ticker.clone(), 0.0_f64, move |event: &Event<f64>| {
//!     sink.set(*event.value());
//!     None
//! });
//! spring.update_target_value(&10.0, true).unwrap();
//!
//! while spring.run_state() == RunState::Running {
//!     ticker.tick(Time::new::<second>(1.0 / 120.0));
//! }
//!
//! assert_eq!(latest.get(), 10.0);
//! ```
//!
//! [`Springable`]: tether_core::Springable
//! [`Observer`]: tether_core::Observer

mod config;
mod error;
mod frame_ticker;
mod spring;
mod ticker;

pub use config::{SpringConfig, StepPolicy};
pub use error::Error;
pub use frame_ticker::{FrameTicker, SubscriptionId};
pub use spring::{
    CompletionCallback, RunState, Spring, SpringBuilder, SpringHandle, SpringObserver,
};
pub use ticker::{TickCallback, Ticker};

pub use tether_solvers::{Action, Event};
