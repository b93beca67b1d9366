// Error taxonomy shared across the crate

use thiserror::Error;

/// Errors produced by shape resolution, construction and group generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two operand shapes cannot be aligned under broadcasting rules.
    #[error("shapes {lhs:?} and {rhs:?} cannot be broadcast together")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// A reshape would change the total element count.
    #[error("cannot reshape {size} element(s) into shape {shape:?}")]
    ReshapeSize { size: usize, shape: Vec<usize> },

    /// A structured type was handed data without its fixed trailing axis
    /// (3 for vectors, 4 for quaternions).
    #[error("expected a trailing axis of size {expected}, got shape {shape:?}")]
    TrailingAxis { expected: usize, shape: Vec<usize> },

    /// Index past the leading shape of a structured array.
    #[error("index {index:?} is out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// `Symmetry::from_symbol` received a symbol outside the 32 point groups.
    #[error("unknown point-group symbol '{0}'")]
    UnknownSymbol(String),

    /// The generator closure outgrew the largest finite point-group order,
    /// so the inputs cannot generate a crystallographic point group.
    #[error("generator closure exceeded the maximum point-group order {max}")]
    DegenerateGenerators { max: usize },
}
