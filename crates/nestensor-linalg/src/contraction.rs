use nestensor_core::{Float, Shape, Tensor, TensorError, TensorResult};
use tracing::debug;

/// Generalized dot product.
///
/// | x rank | y rank | result                                            |
/// |--------|--------|---------------------------------------------------|
/// | 1      | 1      | scalar inner product, lengths must match          |
/// | N ≥ 2  | 1      | `y` contracted against the innermost axis of `x`  |
/// | 2      | 2      | matrix product, `cols(x) == rows(y)`              |
/// | 3      | 3      | batched matrix product, shapes must be identical  |
///
/// Any other combination is `UnsupportedShape`.
pub fn dot<T: Float>(x: &Tensor<T>, y: &Tensor<T>) -> TensorResult<Tensor<T>> {
    let xs = x.shape();
    let ys = y.shape();
    dispatch(x, y, &xs, &ys)
        .inspect_err(|err| debug!(x = %xs, y = %ys, error = %err, "dot failed"))
}

fn dispatch<T: Float>(
    x: &Tensor<T>,
    y: &Tensor<T>,
    xs: &Shape,
    ys: &Shape,
) -> TensorResult<Tensor<T>> {
    match (xs.ndim(), ys.ndim()) {
        (1, 1) => {
            debug!(x = %xs, y = %ys, "dot: vector . vector");
            vector_dot(x, y, xs, ys)
        }
        (n, 1) if n >= 2 => {
            debug!(x = %xs, y = %ys, "dot: tensor . vector");
            Shape::compatible(xs, ys)?;
            contract_last_axis(x, &y.leaves())
        }
        (2, 2) => {
            debug!(x = %xs, y = %ys, "dot: matrix . matrix");
            matmul(x, y, xs, ys)
        }
        (3, 3) => {
            debug!(x = %xs, y = %ys, "dot: batched matrix . matrix");
            batched_matmul(x, y, xs, ys)
        }
        _ => Err(TensorError::UnsupportedShape {
            a: xs.to_vec(),
            b: ys.to_vec(),
        }),
    }
}

fn vector_dot<T: Float>(
    x: &Tensor<T>,
    y: &Tensor<T>,
    xs: &Shape,
    ys: &Shape,
) -> TensorResult<Tensor<T>> {
    if xs != ys {
        return Err(TensorError::ShapeMismatch {
            a: xs.to_vec(),
            b: ys.to_vec(),
        });
    }
    Ok(Tensor::scalar(inner(&x.leaves(), &y.leaves())))
}

fn inner<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::ZERO, |acc, (&p, &q)| acc + p * q)
}

/// Rebuilds `x` without its innermost axis: every rank-1 slice collapses to
/// its inner product with `v`, every outer level keeps its layout.
fn contract_last_axis<T: Float>(x: &Tensor<T>, v: &[T]) -> TensorResult<Tensor<T>> {
    match x.children() {
        Some(rows) if rows.first().is_some_and(|r| !r.is_scalar()) => {
            let parts = rows
                .iter()
                .map(|r| contract_last_axis(r, v))
                .collect::<TensorResult<Vec<_>>>()?;
            Tensor::stack(parts)
        }
        _ => Ok(Tensor::scalar(inner(&x.leaves(), v))),
    }
}

fn matmul<T: Float>(
    x: &Tensor<T>,
    y: &Tensor<T>,
    xs: &Shape,
    ys: &Shape,
) -> TensorResult<Tensor<T>> {
    Shape::compatible(xs, ys)?;
    let (m, k, n) = (xs.dims()[0], xs.dims()[1], ys.dims()[1]);
    let a = x.leaves();
    let b = y.leaves();

    let rows: Vec<Vec<T>> = (0..m)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let mut sum = T::ZERO;
                    for p in 0..k {
                        sum = sum + a[i * k + p] * b[p * n + j];
                    }
                    sum
                })
                .collect()
        })
        .collect();
    Tensor::from_vec2d(&rows)
}

fn batched_matmul<T: Float>(
    x: &Tensor<T>,
    y: &Tensor<T>,
    xs: &Shape,
    ys: &Shape,
) -> TensorResult<Tensor<T>> {
    if xs != ys {
        return Err(TensorError::ShapeMismatch {
            a: xs.to_vec(),
            b: ys.to_vec(),
        });
    }
    let xb = x.children().into_iter().flatten();
    let yb = y.children().into_iter().flatten();
    let batches = xb
        .zip(yb)
        .map(|(a, b)| matmul(a, b, &a.shape(), &b.shape()))
        .collect::<TensorResult<Vec<_>>>()?;
    Tensor::stack(batches)
}
