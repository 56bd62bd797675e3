use tether_core::{ShapeMismatch, TimeStepError};
use tether_solvers::{ParamsError, RestConfigError, simulation};

/// Errors returned when building or updating a [`Spring`](crate::Spring).
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("shape mismatch: {0}")]
    Shape(#[from] ShapeMismatch),

    #[error("invalid time step: {0}")]
    TimeStep(#[from] TimeStepError),

    #[error("invalid spring parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("invalid rest configuration: {0}")]
    Rest(#[from] RestConfigError),

    #[error("the spring behind this handle has been dropped")]
    Released,
}

impl From<simulation::Error> for Error {
    fn from(err: simulation::Error) -> Self {
        match err {
            simulation::Error::Shape(err) => Self::Shape(err),
            simulation::Error::TimeStep(err) => Self::TimeStep(err),
        }
    }
}
