pub mod dtype;
pub mod elementwise;
pub mod error;
pub mod shape;
pub mod tensor;

pub use dtype::Float;
pub use elementwise::{add, divide, elementwise, multiply, subtract};
pub use error::{TensorError, TensorResult};
pub use shape::Shape;
pub use tensor::Tensor;
