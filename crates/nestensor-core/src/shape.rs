use crate::error::{TensorError, TensorResult};

/// Represents the shape of a tensor: one extent per nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    pub fn from_slice(dims: &[usize]) -> Self {
        Shape {
            dims: dims.to_vec(),
        }
    }

    pub fn scalar() -> Self {
        Shape { dims: vec![] }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Size along a specific axis, if the axis exists.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    pub fn first(&self) -> Option<usize> {
        self.dims.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.dims.last().copied()
    }

    /// Total number of leaves.
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.dims.clone()
    }

    /// Shape with the innermost dimension removed.
    pub fn without_last(&self) -> Shape {
        let n = self.dims.len().saturating_sub(1);
        Shape::from_slice(&self.dims[..n])
    }

    /// Contraction compatibility: the last extent of `a` must equal the
    /// first extent of `b` (the matrix-multiply inner-dimension rule).
    ///
    /// This only inspects the boundary dimensions; it is not a general
    /// broadcasting check.
    pub fn compatible(a: &Shape, b: &Shape) -> TensorResult<bool> {
        let (Some(last), Some(first)) = (a.last(), b.first()) else {
            return Err(TensorError::TypeError(format!(
                "compatibility needs non-scalar shapes, got {} and {}",
                a, b
            )));
        };
        if last != first {
            return Err(TensorError::ShapeMismatch {
                a: a.to_vec(),
                b: b.to_vec(),
            });
        }
        Ok(true)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> PartialEq<[usize; N]> for Shape {
    fn eq(&self, other: &[usize; N]) -> bool {
        self.dims == other
    }
}
