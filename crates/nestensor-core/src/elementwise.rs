use crate::dtype::Float;
use crate::error::{TensorError, TensorResult};
use crate::tensor::{Node, Tensor};

use std::ops;
use tracing::debug;

/// Apply a binary scalar operation leaf by leaf.
///
/// A scalar operand is broadcast across every leaf of the other operand.
/// Two non-scalar operands must have exactly the same shape at every depth.
/// The inputs are never modified; the result is always a fresh tensor.
pub fn elementwise<T, F>(x: &Tensor<T>, y: &Tensor<T>, op: F) -> TensorResult<Tensor<T>>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    match (x.as_scalar(), y.as_scalar()) {
        (Some(a), Some(b)) => Ok(Tensor::scalar(op(a, b))),
        (Some(a), None) => Ok(y.map(|b| op(a, b))),
        (None, Some(b)) => Ok(x.map(|a| op(a, b))),
        (None, None) => zip_leaves(x, y, &op).ok_or_else(|| {
            let (a, b) = (x.shape(), y.shape());
            debug!(%a, %b, "elementwise operands differ in shape");
            TensorError::ShapeMismatch {
                a: a.to_vec(),
                b: b.to_vec(),
            }
        }),
    }
}

pub fn add<T: Float>(x: &Tensor<T>, y: &Tensor<T>) -> TensorResult<Tensor<T>> {
    elementwise(x, y, |a, b| a + b)
}

pub fn subtract<T: Float>(x: &Tensor<T>, y: &Tensor<T>) -> TensorResult<Tensor<T>> {
    elementwise(x, y, |a, b| a - b)
}

/// Element-wise (Hadamard) product, not a contraction.
pub fn multiply<T: Float>(x: &Tensor<T>, y: &Tensor<T>) -> TensorResult<Tensor<T>> {
    elementwise(x, y, |a, b| a * b)
}

pub fn divide<T: Float>(x: &Tensor<T>, y: &Tensor<T>) -> TensorResult<Tensor<T>> {
    elementwise(x, y, |a, b| a / b)
}

/// Pairs leaves level by level. Lengths are compared at every depth, not
/// just along the first element, and any disagreement yields `None`.
fn zip_leaves<T, F>(x: &Tensor<T>, y: &Tensor<T>, op: &F) -> Option<Tensor<T>>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    let node = match (&x.node, &y.node) {
        (Node::Scalar(a), Node::Scalar(b)) => Node::Scalar(op(*a, *b)),
        (Node::Seq(xs), Node::Seq(ys)) if xs.len() == ys.len() => Node::Seq(
            xs.iter()
                .zip(ys)
                .map(|(a, b)| zip_leaves(a, b, op))
                .collect::<Option<Vec<_>>>()?,
        ),
        _ => return None,
    };
    Some(Tensor { node })
}

// ─── Operator Overloads ─────────────────────────────────────────────────────

impl<T: Float> ops::Add for &Tensor<T> {
    type Output = TensorResult<Tensor<T>>;
    fn add(self, rhs: Self) -> TensorResult<Tensor<T>> {
        add(self, rhs)
    }
}

impl<T: Float> ops::Sub for &Tensor<T> {
    type Output = TensorResult<Tensor<T>>;
    fn sub(self, rhs: Self) -> TensorResult<Tensor<T>> {
        subtract(self, rhs)
    }
}

impl<T: Float> ops::Mul for &Tensor<T> {
    type Output = TensorResult<Tensor<T>>;
    fn mul(self, rhs: Self) -> TensorResult<Tensor<T>> {
        multiply(self, rhs)
    }
}

impl<T: Float> ops::Div for &Tensor<T> {
    type Output = TensorResult<Tensor<T>>;
    fn div(self, rhs: Self) -> TensorResult<Tensor<T>> {
        divide(self, rhs)
    }
}

impl<T: Float> ops::Neg for &Tensor<T> {
    type Output = Tensor<T>;
    fn neg(self) -> Tensor<T> {
        self.map(|x| -x)
    }
}
