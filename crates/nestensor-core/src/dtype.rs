use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait bound for the scalar type stored in tensor leaves.
/// Implemented for `f32` and `f64`; `f64` is the default everywhere.
pub trait Float:
    Copy
    + Clone
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    const ZERO: Self;

    fn from_f64(v: f64) -> Self;
}

impl Float for f32 {
    const ZERO: Self = 0.0;

    #[inline] fn from_f64(v: f64) -> Self { v as f32 }
}

impl Float for f64 {
    const ZERO: Self = 0.0;

    #[inline] fn from_f64(v: f64) -> Self { v }
}
