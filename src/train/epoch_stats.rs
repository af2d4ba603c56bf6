use serde::{Serialize, Deserialize};

/// Per-epoch training statistics returned by `train_loop`.
///
/// `train_loop` pushes one `EpochStats` value per completed epoch, in order,
/// so the returned history can be plotted or compared window by window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean MSE of each sample measured just before its own update, i.e. the
    /// running loss seen while the weights were still moving.
    pub online_loss: f64,
    /// Mean MSE over all samples, measured after the epoch's last update.
    pub train_loss: f64,
    /// Fraction of samples in [0, 1] whose argmax output matches the argmax
    /// target; only set when the network has more than one output.
    pub accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
