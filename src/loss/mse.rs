use crate::data::Sample;
use crate::error::Result;
use crate::network::Network;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Mean per-sample MSE of `network` over `samples`, without training.
    pub fn dataset_loss(network: &mut Network, samples: &[Sample]) -> Result<f64> {
        let mut total = 0.0;
        for sample in samples {
            let output = network.get_output(&sample.input)?;
            total += MseLoss::loss(&output, &sample.target);
        }
        Ok(total / samples.len() as f64)
    }
}
