use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Everything that can go wrong while building, feeding or persisting a `Network`.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The input vector length differs from the number of non-bias input neurons.
    #[error("invalid input size: expected {expected} values, got {got}")]
    InputSizeMismatch { expected: usize, got: usize },

    #[error("invalid target size: expected {expected} values, got {got}")]
    TargetSizeMismatch { expected: usize, got: usize },

    /// A flat weight vector must cover every connection exactly.
    #[error("invalid weight vector: network has {expected} connections, got {got} weights")]
    WeightCountMismatch { expected: usize, got: usize },

    #[error("expected {expected} input names, got {got}")]
    InputNameCountMismatch { expected: usize, got: usize },

    #[error("layer {layer} has no neurons")]
    EmptyLayer { layer: usize },

    #[error("dataset contains no samples")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
