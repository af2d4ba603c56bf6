pub mod activation;
pub mod data;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::Sigmoid;
pub use data::{normalize_samples, Bounds, Sample};
pub use error::{NetworkError, Result};
pub use loss::mse::MseLoss;
pub use math::init::WeightInit;
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use train::{train_loop, train_network, EpochStats, TrainConfig};
