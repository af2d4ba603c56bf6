use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::data::{argmax, Sample};
use crate::error::{NetworkError, Result};
use crate::loss::mse::MseLoss;
use crate::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_network;

/// Trains `network` for `config.epochs` epochs and returns the stats of every epoch.
///
/// `rng` only decides the sample order when `config.shuffle` is set.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    if samples.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }

    let mut history = Vec::with_capacity(config.epochs);
    let mut order: Vec<usize> = (0..samples.len()).collect();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(rng);
        }
        let online_loss = train_network(network, order.iter().map(|&i| &samples[i]))?;

        let train_loss = MseLoss::dataset_loss(network, samples)?;
        let accuracy = if network.outputs().len() > 1 {
            Some(compute_accuracy(network, samples)?)
        } else {
            None
        };
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if !train_loss.is_finite() {
            warn!(epoch, "training loss is no longer finite");
        }
        debug!(epoch, online_loss, train_loss, ?accuracy, elapsed_ms, "epoch finished");

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            online_loss,
            train_loss,
            accuracy,
            elapsed_ms,
        });
    }

    if let Some(last) = history.last() {
        info!(
            epochs = config.epochs,
            samples = samples.len(),
            train_loss = last.train_loss,
            accuracy = ?last.accuracy,
            "training finished"
        );
    }
    Ok(history)
}

/// Fraction of samples classified correctly (argmax match).
fn compute_accuracy(network: &mut Network, samples: &[Sample]) -> Result<f64> {
    let mut correct = 0usize;
    for sample in samples {
        let output = network.get_output(&sample.input)?;
        if argmax(&output) == argmax(&sample.target) {
            correct += 1;
        }
    }
    Ok(correct as f64 / samples.len() as f64)
}
