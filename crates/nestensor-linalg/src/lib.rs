pub mod contraction;

pub use contraction::dot;
