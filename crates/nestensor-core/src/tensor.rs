use crate::dtype::Float;
use crate::error::{TensorError, TensorResult};
use crate::shape::Shape;

use std::fmt;

/// Runtime-ranked tensor: either a single scalar or a sequence of tensors
/// that all share the same sub-shape.
///
/// The representation is private. Every public constructor checks that
/// siblings are homogeneous, so a jagged tensor cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T: Float = f64> {
    pub(crate) node: Node<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node<T: Float> {
    Scalar(T),
    Seq(Vec<Tensor<T>>),
}

// ─── Construction ───────────────────────────────────────────────────────────

impl<T: Float> Tensor<T> {
    /// Create a rank-0 tensor.
    pub fn scalar(value: T) -> Self {
        Tensor {
            node: Node::Scalar(value),
        }
    }

    /// Create a rank-1 tensor from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Tensor {
            node: Node::Seq(data.iter().copied().map(Tensor::scalar).collect()),
        }
    }

    /// Create a rank-2 tensor from rows. Rows must all have the same length.
    pub fn from_vec2d(data: &[Vec<T>]) -> TensorResult<Self> {
        Tensor::stack(data.iter().map(|row| Tensor::from_slice(row)).collect())
    }

    /// Create a rank-3 tensor from a list of matrices.
    pub fn from_vec3d(data: &[Vec<Vec<T>>]) -> TensorResult<Self> {
        let matrices = data
            .iter()
            .map(|m| Tensor::from_vec2d(m))
            .collect::<TensorResult<Vec<_>>>()?;
        Tensor::stack(matrices)
    }

    /// Wrap `children` in a new outer dimension.
    ///
    /// Fails if `children` is empty, if scalars and sequences are mixed, or if
    /// any two children differ in shape.
    pub fn stack(children: Vec<Tensor<T>>) -> TensorResult<Self> {
        let Some(first) = children.first() else {
            return Err(TensorError::EmptyTensor);
        };
        let expected = first.shape();
        for child in &children[1..] {
            if child.is_scalar() != first.is_scalar() {
                return Err(TensorError::TypeError(
                    "sequence mixes scalars and nested sequences".to_string(),
                ));
            }
            let got = child.shape();
            if got != expected {
                return Err(TensorError::ShapeMismatch {
                    a: expected.to_vec(),
                    b: got.to_vec(),
                });
            }
        }
        Ok(Tensor {
            node: Node::Seq(children),
        })
    }

    /// Create a zero-filled tensor of the given shape.
    ///
    /// With `drop_last` the innermost extent is discarded first, which is the
    /// output shape of a contraction over that axis. An empty shape yields a
    /// scalar zero. The structure is built innermost-first and every slot
    /// holds its own deep copy, so no two branches share storage.
    pub fn zeros(dims: &[usize], drop_last: bool) -> Self {
        let dims = if drop_last {
            &dims[..dims.len().saturating_sub(1)]
        } else {
            dims
        };
        let Some((&innermost, outer)) = dims.split_last() else {
            return Tensor::scalar(T::ZERO);
        };

        let mut child = Tensor::from_slice(&vec![T::ZERO; innermost]);
        for &extent in outer.iter().rev() {
            let slots = (0..extent).map(|_| child.clone()).collect();
            child = Tensor {
                node: Node::Seq(slots),
            };
        }
        child
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    /// Shape of the tensor, read by following the first element at each level.
    pub fn shape(&self) -> Shape {
        let mut dims = Vec::new();
        let mut current = self;
        while let Node::Seq(children) = &current.node {
            dims.push(children.len());
            match children.first() {
                Some(first) => current = first,
                None => break,
            }
        }
        Shape::new(dims)
    }

    pub fn rank(&self) -> usize {
        self.shape().ndim()
    }

    /// Number of scalar leaves.
    pub fn numel(&self) -> usize {
        match &self.node {
            Node::Scalar(_) => 1,
            Node::Seq(children) => children.iter().map(Tensor::numel).sum(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.node, Node::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<T> {
        match self.node {
            Node::Scalar(v) => Some(v),
            Node::Seq(_) => None,
        }
    }

    /// Elements of the outermost dimension, or `None` for a scalar.
    pub fn children(&self) -> Option<&[Tensor<T>]> {
        match &self.node {
            Node::Scalar(_) => None,
            Node::Seq(children) => Some(children),
        }
    }

    /// All leaves in row-major order.
    pub fn leaves(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.numel());
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<T>) {
        match &self.node {
            Node::Scalar(v) => out.push(*v),
            Node::Seq(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Read the scalar at `path`.
    pub fn get_at(&self, path: &[usize]) -> TensorResult<T> {
        self.leaf(path).ok_or_else(|| TensorError::InvalidPath {
            path: path.to_vec(),
            rank: self.rank(),
        })
    }

    /// Overwrite the scalar at `path` with `value`.
    ///
    /// The path must name a leaf: one index per rank level, each in bounds.
    /// On failure the tensor is left untouched.
    pub fn write_at(&mut self, path: &[usize], value: T) -> TensorResult<()> {
        let rank = self.rank();
        let slot = self
            .leaf_mut(path)
            .ok_or_else(|| TensorError::InvalidPath {
                path: path.to_vec(),
                rank,
            })?;
        *slot = value;
        Ok(())
    }

    fn leaf(&self, path: &[usize]) -> Option<T> {
        match (&self.node, path.split_first()) {
            (Node::Scalar(v), None) => Some(*v),
            (Node::Seq(children), Some((&i, rest))) => children.get(i)?.leaf(rest),
            _ => None,
        }
    }

    fn leaf_mut(&mut self, path: &[usize]) -> Option<&mut T> {
        match (&mut self.node, path.split_first()) {
            (Node::Scalar(v), None) => Some(v),
            (Node::Seq(children), Some((&i, rest))) => children.get_mut(i)?.leaf_mut(rest),
            _ => None,
        }
    }

    // ─── Element-wise Maps ──────────────────────────────────────────────────

    /// Apply `f` to every leaf, visiting leaves in row-major order, and return
    /// a new tensor of the same shape.
    pub fn map<F: FnMut(T) -> T>(&self, mut f: F) -> Tensor<T> {
        self.map_with(&mut f)
    }

    fn map_with<F: FnMut(T) -> T>(&self, f: &mut F) -> Tensor<T> {
        let node = match &self.node {
            Node::Scalar(v) => Node::Scalar(f(*v)),
            Node::Seq(children) => Node::Seq(children.iter().map(|c| c.map_with(f)).collect()),
        };
        Tensor { node }
    }
}

// ─── Display ────────────────────────────────────────────────────────────────

impl<T: Float> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Scalar(v) => write!(f, "{}", v),
            Node::Seq(children) => {
                write!(f, "[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "]")
            }
        }
    }
}
