use crate::{FixedArity, ShapeMismatch, Springable};

use super::split;

impl<T: FixedArity, const N: usize> Springable for [T; N] {
    fn arity(&self) -> usize {
        <Self as FixedArity>::ARITY
    }

    fn write_components(&self, out: &mut Vec<f64>) {
        for item in self {
            item.write_components(out);
        }
    }

    fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch> {
        ShapeMismatch::check(<Self as FixedArity>::ARITY, components.len())?;
        let items = split::<T>(components, N)?;

        // Length was checked above, so the conversion cannot fail.
        items.try_into().map_err(|_| ShapeMismatch::Length {
            expected: <Self as FixedArity>::ARITY,
            found: components.len(),
        })
    }
}

impl<T: FixedArity, const N: usize> FixedArity for [T; N] {
    const ARITY: usize = N * T::ARITY;
}

/// Implements the springing traits for a tuple of fixed-arity elements.
///
/// Elements marshal in field order, so `(x, y)` is a 2-D point.
macro_rules! impl_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: FixedArity),+> Springable for ($($name,)+) {
            fn arity(&self) -> usize {
                <Self as FixedArity>::ARITY
            }

            fn write_components(&self, out: &mut Vec<f64>) {
                $(self.$idx.write_components(out);)+
            }

            #[allow(unused_assignments)]
            fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch> {
                ShapeMismatch::check(<Self as FixedArity>::ARITY, components.len())?;
                let mut rest = components;
                Ok(($({
                    let (head, tail) = rest.split_at($name::ARITY);
                    rest = tail;
                    $name::from_components(head)?
                },)+))
            }
        }

        impl<$($name: FixedArity),+> FixedArity for ($($name,)+) {
            const ARITY: usize = 0 $(+ $name::ARITY)+;
        }
    };
}

impl_tuple!(A.0, B.1);
impl_tuple!(A.0, B.1, C.2);
impl_tuple!(A.0, B.1, C.2, D.3);
