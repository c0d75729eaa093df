pub mod noise;

pub use noise::{gaussian_noise, randn, NoiseConfig};
