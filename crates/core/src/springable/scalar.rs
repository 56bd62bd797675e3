use crate::{FixedArity, ShapeMismatch, Springable};

/// Extracts the single component of a scalar.
fn single(components: &[f64]) -> Result<f64, ShapeMismatch> {
    match components {
        [x] => Ok(*x),
        _ => Err(ShapeMismatch::Length {
            expected: 1,
            found: components.len(),
        }),
    }
}

impl Springable for f64 {
    fn arity(&self) -> usize {
        1
    }

    fn write_components(&self, out: &mut Vec<f64>) {
        out.push(*self);
    }

    fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch> {
        single(components)
    }
}

impl FixedArity for f64 {
    const ARITY: usize = 1;
}

impl Springable for f32 {
    fn arity(&self) -> usize {
        1
    }

    fn write_components(&self, out: &mut Vec<f64>) {
        out.push(f64::from(*self));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch> {
        single(components).map(|x| x as f32)
    }
}

impl FixedArity for f32 {
    const ARITY: usize = 1;
}

/// Integers round to the nearest value on the way back, saturating at the
/// bounds of the type.
impl Springable for i32 {
    fn arity(&self) -> usize {
        1
    }

    fn write_components(&self, out: &mut Vec<f64>) {
        out.push(f64::from(*self));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch> {
        single(components).map(|x| x.round() as i32)
    }
}

impl FixedArity for i32 {
    const ARITY: usize = 1;
}

impl Springable for i64 {
    fn arity(&self) -> usize {
        1
    }

    #[allow(clippy::cast_precision_loss)]
    fn write_components(&self, out: &mut Vec<f64>) {
        out.push(*self as f64);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch> {
        single(components).map(|x| x.round() as i64)
    }
}

impl FixedArity for i64 {
    const ARITY: usize = 1;
}
