mod composite;
mod scalar;
mod sequence;

use crate::ShapeMismatch;

/// A value that a spring can drive.
///
/// Implementing this trait lets the spring solvers work with any value type by
/// marshalling it to and from an ordered list of `f64` components. Each
/// component is simulated as an independent degree of freedom.
///
/// Implementations must satisfy the round-trip law: for every representable
/// value `v`, `from_components(&v.to_components())` reproduces `v` (exactly
/// for integral types, within float precision otherwise).
///
/// Composite types marshal by concatenating their elements in order.
pub trait Springable: Sized {
    /// Returns the number of components this value marshals to.
    fn arity(&self) -> usize;

    /// Appends this value's components to `out`, in order.
    fn write_components(&self, out: &mut Vec<f64>);

    /// Returns this value's components, in order.
    ///
    /// The returned vector always has [`arity`](Springable::arity) elements.
    #[must_use]
    fn to_components(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.arity());
        self.write_components(&mut out);
        out
    }

    /// Rebuilds a value from its components.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if the number of components cannot represent
    /// a value of this type.
    fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch>;
}

/// A [`Springable`] type whose component count is known at compile time.
///
/// Fixed-arity types can be nested inside arrays, tuples, and sequences.
/// Sequences themselves are not fixed-arity, so a `Vec<Vec<T>>` is rejected
/// by the type checker instead of failing at runtime.
pub trait FixedArity: Springable {
    /// The number of components every value of this type marshals to.
    const ARITY: usize;
}

/// Rebuilds `count` consecutive values of `T` from `components`.
///
/// The caller must ensure `components` holds exactly `count * T::ARITY` values.
fn split<T: FixedArity>(components: &[f64], count: usize) -> Result<Vec<T>, ShapeMismatch> {
    (0..count)
        .map(|i| T::from_components(&components[i * T::ARITY..(i + 1) * T::ARITY]))
        .collect()
}
