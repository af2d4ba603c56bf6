pub mod sigmoid;

pub use sigmoid::{clamp_output, Sigmoid, OUTPUT_MAX, OUTPUT_MIN};
