//! Damped spring solvers for the Tether framework.
//!
//! Every spring simulates, per component, the damped harmonic oscillator
//!
//! ```text
//! x'' + 2ζω·x' + ω²·(x - x_target) = 0
//! ```
//!
//! where `ω` is the angular frequency and `ζ` the damping ratio, both derived
//! from user-facing tuning knobs in [`SpringParams`].
//!
//! # Modules
//!
//! - [`params`]: derives `ω` and `ζ` from oscillation frequency and half-life
//! - [`scheme`]: the two integration schemes
//! - [`state`]: position, velocity, and target vectors of one spring
//! - [`rest`]: decides when successive positions have stopped changing
//! - [`simulation`]: a typed spring over any [`Springable`] value
//! - [`run`]: steps a simulation offline until it settles
//!
//! [`Springable`]: tether_core::Springable

pub mod params;
pub mod rest;
pub mod run;
pub mod scheme;
pub mod simulation;
pub mod state;

mod event;

pub use event::{Action, Event};
pub use params::{ParamsError, SpringParams};
pub use rest::{RestConfig, RestConfigError, RestDetector};
pub use scheme::Scheme;
pub use simulation::Simulation;
pub use state::SpringState;
