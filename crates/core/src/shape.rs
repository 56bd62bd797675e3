use thiserror::Error;

/// Error returned when a component count does not match the expected shape.
///
/// A spring fixes its dimensionality when it is created. Any later value with
/// a different number of components is rejected with this error rather than
/// silently resizing the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    #[error("expected {expected} components, found {found}")]
    Length { expected: usize, found: usize },

    #[error("{found} components do not divide into chunks of {chunk}")]
    Chunk { found: usize, chunk: usize },
}

impl ShapeMismatch {
    /// Checks that `found` components match the `expected` count.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch::Length`] if the counts differ.
    pub fn check(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::Length { expected, found })
        }
    }
}
