//! # nestensor
//!
//! A small tensor-algebra kernel over nested arrays whose rank is only known
//! at runtime.
//!
//! ## Modules
//!
//! - **core** — `Tensor`, `Shape`, zero construction, path writes, element-wise `add`/`multiply`
//! - **linalg** — `dot`: inner products, tensor·vector contraction, (batched) matrix multiply
//! - **random** — Gaussian noise tensors (`randn`)
//!
//! ```
//! use nestensor::prelude::*;
//!
//! let x = Tensor::from_vec2d(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]).unwrap();
//! let y = Tensor::from_slice(&[1.0, 2.0, 3.0]);
//! assert_eq!(dot(&x, &y).unwrap(), Tensor::from_slice(&[14.0, 14.0]));
//! ```

/// Tensor type, shapes, errors and element-wise kernels.
pub use nestensor_core as core;

/// Contractions.
pub use nestensor_linalg as linalg;

/// Noise generation.
pub use nestensor_random as random;

pub mod prelude {
    pub use nestensor_core::{
        add, divide, elementwise, multiply, subtract, Float, Shape, Tensor, TensorError,
        TensorResult,
    };
    pub use nestensor_linalg::dot;
    pub use nestensor_random::{randn, NoiseConfig};
}
