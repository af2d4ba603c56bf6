use std::f64::consts::E;

/// Lower bound of every output neuron value.
pub const OUTPUT_MIN: f64 = 0.001;
/// Upper bound of every output neuron value.
pub const OUTPUT_MAX: f64 = 0.999;

/// The logistic function, the only nonlinearity hidden neurons use.
pub struct Sigmoid;

impl Sigmoid {
    /// σ(x) = 1 / (1 + e^-x)
    pub fn function(x: f64) -> f64 {
        1.0 / (1.0 + E.powf(-x))
    }

    /// σ'(x) written in terms of the output y = σ(x): y(1 - y).
    pub fn derivative_from_output(y: f64) -> f64 {
        y * (1.0 - y)
    }
}

/// Clamps an output neuron's weighted sum into [OUTPUT_MIN, OUTPUT_MAX].
///
/// The bounds are inclusive: a saturated output equals `OUTPUT_MIN` or
/// `OUTPUT_MAX` exactly rather than lying strictly between them.
///
/// `f64::min`/`f64::max` discard a NaN operand, so a NaN sum lands on
/// `OUTPUT_MAX` instead of leaking out of the network.
pub fn clamp_output(x: f64) -> f64 {
    x.min(OUTPUT_MAX).max(OUTPUT_MIN)
}
