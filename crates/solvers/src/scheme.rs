//! Integration schemes for the damped spring equation.
//!
//! Both schemes advance every component independently, so component order only
//! matters in that it must match how values are marshalled.
//!
//! # Semi-implicit Euler
//!
//! ```text
//! v += -2·dt·ζ·ω·v + dt·ω²·(xt - x)
//! x += dt·v
//! ```
//!
//! Cheap, but only conditionally stable: it diverges once `dt·ω` grows too
//! large. Use it when ticks arrive at a steady display rate.
//!
//! # Implicit Euler
//!
//! Solves the linear system for the next state directly:
//!
//! ```text
//! f      = 1 + 2·dt·ζ·ω
//! detInv = 1 / (f + dt²·ω²)
//! x'     = (f·x + dt·v + dt²·ω²·xt) · detInv
//! v'     = (v + dt·ω²·(xt - x)) · detInv
//! ```
//!
//! Unconditionally stable, so it tolerates large or irregular steps from a
//! variable-rate tick source. Slightly more damped than the true solution.

use tether_core::TimeStep;

use crate::SpringParams;

/// Numerical scheme used to advance a spring by one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scheme {
    /// Symplectic Euler: fast, conditionally stable.
    #[default]
    SemiImplicitEuler,

    /// Backward Euler: unconditionally stable.
    ImplicitEuler,
}

impl Scheme {
    /// Advances `position` and `velocity` in place by one step of size `dt`.
    ///
    /// The three slices must have equal length; [`SpringState`] enforces this.
    ///
    /// [`SpringState`]: crate::SpringState
    pub fn step(
        self,
        params: &SpringParams,
        dt: TimeStep,
        position: &mut [f64],
        velocity: &mut [f64],
        target: &[f64],
    ) {
        debug_assert_eq!(position.len(), velocity.len());
        debug_assert_eq!(position.len(), target.len());

        let h = dt.as_seconds();
        let omega = params.angular_frequency();
        let zeta = params.damping_ratio();

        match self {
            Scheme::SemiImplicitEuler => {
                semi_implicit_euler(h, omega, zeta, position, velocity, target);
            }
            Scheme::ImplicitEuler => {
                implicit_euler(h, omega, zeta, position, velocity, target);
            }
        }
    }
}

fn semi_implicit_euler(
    h: f64,
    omega: f64,
    zeta: f64,
    position: &mut [f64],
    velocity: &mut [f64],
    target: &[f64],
) {
    let damping = 2.0 * h * zeta * omega;
    let stiffness = h * omega * omega;

    for ((x, v), xt) in position.iter_mut().zip(velocity.iter_mut()).zip(target) {
        *v += -damping * *v + stiffness * (xt - *x);
        *x += h * *v;
    }
}

fn implicit_euler(
    h: f64,
    omega: f64,
    zeta: f64,
    position: &mut [f64],
    velocity: &mut [f64],
    target: &[f64],
) {
    let f = 1.0 + 2.0 * h * zeta * omega;
    let oo = omega * omega;
    let hoo = h * oo;
    let hhoo = h * hoo;
    let det_inv = 1.0 / (f + hhoo);

    for ((x, v), xt) in position.iter_mut().zip(velocity.iter_mut()).zip(target) {
        // Both updates read the pre-step position and velocity.
        let det_x = f * *x + h * *v + hhoo * xt;
        let det_v = *v + hoo * (xt - *x);
        *x = det_x * det_inv;
        *v = det_v * det_inv;
    }
}
