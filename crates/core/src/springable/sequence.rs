use crate::{FixedArity, ShapeMismatch, Springable};

/// Sequences marshal by concatenating their elements.
///
/// A sequence's arity depends on its length, so it is fixed per value rather
/// than per type. Decoding splits the components into consecutive chunks of
/// the element arity. An empty component list always decodes to an empty
/// sequence.
impl<T: FixedArity> Springable for Vec<T> {
    fn arity(&self) -> usize {
        self.len() * T::ARITY
    }

    fn write_components(&self, out: &mut Vec<f64>) {
        for item in self {
            item.write_components(out);
        }
    }

    fn from_components(components: &[f64]) -> Result<Self, ShapeMismatch> {
        if components.is_empty() {
            return Ok(Vec::new());
        }

        if T::ARITY == 0 || components.len() % T::ARITY != 0 {
            return Err(ShapeMismatch::Chunk {
                found: components.len(),
                chunk: T::ARITY,
            });
        }

        components
            .chunks_exact(T::ARITY)
            .map(T::from_components)
            .collect()
    }
}
