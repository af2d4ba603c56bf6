//! Training samples and the helpers that prepare them for a network.

mod normalize;
mod sample;

pub use normalize::{normalize_samples, Bounds};
pub use sample::{argmax, one_hot, Sample};
