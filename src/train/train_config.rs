use serde::{Deserialize, Serialize};

/// Configuration for a `train_loop` run.
///
/// Training is always online: one `Network::train` step per sample, with no
/// batching.
///
/// # Fields
/// - `epochs`  — total number of full passes over the training data
/// - `shuffle` — when `true`, samples are visited in a fresh random order
///               every epoch (drawn from the rng passed to `train_loop`);
///               otherwise they are visited in dataset order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    #[serde(default)]
    pub shuffle: bool,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that visits samples in dataset order.
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs, shuffle: false }
    }

    /// Same configuration, but reshuffling the sample order every epoch.
    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }
}
