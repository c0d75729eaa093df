use thiserror::Error;

/// Core error type for all tensor operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Shape mismatch: {a:?} and {b:?} are not compatible")]
    ShapeMismatch { a: Vec<usize>, b: Vec<usize> },

    #[error("Unsupported shapes: no operation defined for {a:?} and {b:?}")]
    UnsupportedShape { a: Vec<usize>, b: Vec<usize> },

    #[error("Invalid path: {path:?} does not resolve to a scalar in a tensor of rank {rank}")]
    InvalidPath { path: Vec<usize>, rank: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Empty tensor")]
    EmptyTensor,
}

pub type TensorResult<T> = Result<T, TensorError>;
