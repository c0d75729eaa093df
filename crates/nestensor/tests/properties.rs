//! Cross-crate behaviour of the public API, plus property tests over
//! randomly shaped tensors.

use approx::assert_relative_eq;
use nestensor::prelude::*;
use proptest::prelude::*;

fn build(dims: &[usize], data: &[f64]) -> Tensor {
    let mut values = data.iter().copied();
    Tensor::zeros(dims, false).map(|_| values.next().unwrap_or(0.0))
}

fn dims_strategy(max_rank: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..5, 1..=max_rank)
}

fn tensor_strategy() -> impl Strategy<Value = Tensor> {
    dims_strategy(4)
        .prop_flat_map(|dims| {
            let n: usize = dims.iter().product();
            (Just(dims), prop::collection::vec(-100.0f64..100.0, n))
        })
        .prop_map(|(dims, data)| build(&dims, &data))
}

fn tensor_pair_strategy() -> impl Strategy<Value = (Tensor, Tensor)> {
    dims_strategy(3)
        .prop_flat_map(|dims| {
            let n: usize = dims.iter().product();
            (
                Just(dims),
                prop::collection::vec(-100.0f64..100.0, n),
                prop::collection::vec(-100.0f64..100.0, n),
            )
        })
        .prop_map(|(dims, a, b)| (build(&dims, &a), build(&dims, &b)))
}

#[test]
fn test_documented_examples() {
    let v = Tensor::from_slice(&[1.0, 2.0, 3.0]);
    assert_eq!(dot(&v, &v).unwrap(), Tensor::scalar(14.0));

    let m = Tensor::from_vec2d(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    assert_eq!(
        multiply(&Tensor::scalar(2.0), &m).unwrap(),
        Tensor::from_vec2d(&[vec![2.0, 4.0], vec![6.0, 8.0]]).unwrap()
    );

    let x = Tensor::from_vec2d(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]).unwrap();
    assert_eq!(dot(&x, &v).unwrap(), Tensor::from_slice(&[14.0, 14.0]));

    let a: Tensor = Tensor::zeros(&[2, 3], false);
    let b: Tensor = Tensor::zeros(&[3, 2], false);
    assert_eq!(dot(&a, &b).unwrap().shape(), [2, 2]);
    let c: Tensor = Tensor::zeros(&[2, 2], false);
    assert!(matches!(dot(&a, &c), Err(TensorError::ShapeMismatch { .. })));
}

#[test]
fn test_zeros_calls_do_not_alias() {
    let mut first: Tensor = Tensor::zeros(&[2, 3], false);
    let second: Tensor = Tensor::zeros(&[2, 3], false);
    first.write_at(&[1, 1], 5.0).unwrap();
    assert_eq!(second.shape(), [2, 3]);
    assert!(second.leaves().iter().all(|&v| v == 0.0));
}

#[test]
fn test_noise_feeds_the_kernel() {
    let config = NoiseConfig::new().with_seed(11);
    let w: Tensor = randn(&[4, 3], &config).unwrap();
    let x: Tensor = randn(&[3], &config).unwrap();
    let y = dot(&w, &x).unwrap();
    assert_eq!(y.shape(), [4]);
    let shifted = add(&y, &Tensor::scalar(1.0)).unwrap();
    for (s, o) in shifted.leaves().iter().zip(y.leaves()) {
        assert_relative_eq!(*s, o + 1.0);
    }
}

proptest! {
    #[test]
    fn prop_zeros_shape_roundtrip(dims in dims_strategy(4)) {
        let z: Tensor = Tensor::zeros(&dims, false);
        prop_assert_eq!(z.shape(), Shape::new(dims.clone()));
        prop_assert!(z.leaves().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn prop_zeros_branches_independent(dims in dims_strategy(4)) {
        let mut z: Tensor = Tensor::zeros(&dims, false);
        let path: Vec<usize> = dims.iter().map(|d| d - 1).collect();
        z.write_at(&path, 1.0).unwrap();
        prop_assert_eq!(z.leaves().iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn prop_scalar_multiply_preserves_shape(t in tensor_strategy(), c in -10.0f64..10.0) {
        let scaled = multiply(&Tensor::scalar(c), &t).unwrap();
        prop_assert_eq!(scaled.shape(), t.shape());
        for (s, x) in scaled.leaves().iter().zip(t.leaves()) {
            prop_assert_eq!(*s, c * x);
        }
    }

    #[test]
    fn prop_multiply_commutes((a, b) in tensor_pair_strategy()) {
        prop_assert_eq!(multiply(&a, &b).unwrap(), multiply(&b, &a).unwrap());
        prop_assert_eq!(add(&a, &b).unwrap(), add(&b, &a).unwrap());
    }

    #[test]
    fn prop_contract_last_axis(t in tensor_strategy(), seed in any::<u64>()) {
        prop_assume!(t.rank() >= 2);
        let shape = t.shape();
        let inner_len = shape.last().unwrap();
        let v: Tensor = randn(&[inner_len], &NoiseConfig::new().with_seed(seed)).unwrap();

        let out = dot(&t, &v).unwrap();
        prop_assert_eq!(out.shape(), shape.without_last());

        let weights = v.leaves();
        let expected: Vec<f64> = t
            .leaves()
            .chunks(inner_len)
            .map(|row| row.iter().zip(&weights).map(|(a, b)| a * b).sum())
            .collect();
        for (got, want) in out.leaves().iter().zip(&expected) {
            prop_assert!((got - want).abs() <= 1e-9 * (1.0 + want.abs()));
        }
    }

    #[test]
    fn prop_matmul_shape(m in 1usize..5, k in 1usize..5, n in 1usize..5) {
        let a: Tensor = Tensor::zeros(&[m, k], false).map(|_| 1.0);
        let b: Tensor = Tensor::zeros(&[k, n], false).map(|_| 1.0);
        let c = dot(&a, &b).unwrap();
        prop_assert_eq!(c.shape(), [m, n]);
        prop_assert!(c.leaves().iter().all(|&v| v == k as f64));
    }
}
