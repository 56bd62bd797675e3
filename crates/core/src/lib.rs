//! Core traits and types for the Tether springing framework.
//!
//! This crate defines the shared abstractions that solvers and animators
//! build on:
//!
//! - [`Springable`]: a value that marshals to and from a flat list of `f64`
//!   components, with [`FixedArity`] for types whose component count is known
//!   at compile time
//! - [`ShapeMismatch`]: the error raised when a component count does not fit
//! - [`TimeStep`]: a unit-safe, strictly positive step size
//! - [`Observer`]: receives events and optionally returns control actions

mod observer;
mod shape;
mod springable;
mod time_step;

pub use observer::Observer;
pub use shape::ShapeMismatch;
pub use springable::{FixedArity, Springable};
pub use time_step::{TimeStep, TimeStepError};
