use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How fresh connection weights are drawn when no weight vector is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightInit {
    /// Independent uniform samples in [0, 1).
    #[default]
    Uniform,
    /// Independent samples from N(mean, std_dev²).
    Gaussian { mean: f64, std_dev: f64 },
}

impl WeightInit {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            WeightInit::Uniform => rng.gen::<f64>(),
            WeightInit::Gaussian { mean, std_dev } => sample_gaussian(rng, mean, std_dev),
        }
    }
}

/// Samples N(mean, std_dev²) using the Box-Muller transform.
pub fn sample_gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // Both uniforms on (0, 1] so ln never sees zero.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    let standard = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    standard * std_dev + mean
}
