use nestensor_core::{Float, Tensor, TensorError, TensorResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Parameters of the normal distribution sampled by [`randn`].
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    pub mean: f64,
    pub variance: f64,
    /// Fixed seed for reproducible output; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            mean: 0.0,
            variance: 1.0,
            seed: None,
        }
    }
}

impl NoiseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mean(mut self, mean: f64) -> Self {
        self.mean = mean;
        self
    }

    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> TensorResult<()> {
        if !self.mean.is_finite() {
            return Err(TensorError::InvalidOperation(format!(
                "noise mean must be finite, got {}",
                self.mean
            )));
        }
        if !self.variance.is_finite() || self.variance < 0.0 {
            return Err(TensorError::InvalidOperation(format!(
                "noise variance must be finite and non-negative, got {}",
                self.variance
            )));
        }
        Ok(())
    }
}

/// Draw one sample from N(mean, variance) using the Box-Muller transform.
pub fn gaussian_noise<R: Rng + ?Sized>(rng: &mut R, mean: f64, variance: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-10);
    let u2: f64 = rng.gen::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * std::f64::consts::PI * u2;
    r * theta.cos() * variance.sqrt() + mean
}

/// Tensor of the given shape filled with normally distributed values.
/// An empty shape yields a single scalar sample.
pub fn randn<T: Float>(dims: &[usize], config: &NoiseConfig) -> TensorResult<Tensor<T>> {
    config.validate()?;
    trace!(?dims, seed = ?config.seed, "randn");

    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let (mean, variance) = (config.mean, config.variance);
    Ok(Tensor::zeros(dims, false).map(|_| T::from_f64(gaussian_noise(&mut rng, mean, variance))))
}
