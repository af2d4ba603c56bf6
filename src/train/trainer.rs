use crate::data::Sample;
use crate::error::{NetworkError, Result};
use crate::loss::mse::MseLoss;
use crate::network::Network;

/// One online epoch: every sample in order gets one `Network::train` step.
///
/// Returns the mean loss each sample had just before its own update, or
/// `EmptyDataset` when `samples` yields nothing.
pub fn train_network<'a, I>(network: &mut Network, samples: I) -> Result<f64>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut total_loss = 0.0;
    let mut count = 0usize;

    for sample in samples {
        let output = network.get_output(&sample.input)?;
        total_loss += MseLoss::loss(&output, &sample.target);
        network.train(&sample.input, &sample.target)?;
        count += 1;
    }

    if count == 0 {
        return Err(NetworkError::EmptyDataset);
    }
    Ok(total_loss / count as f64)
}
