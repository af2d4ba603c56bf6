pub mod init;

pub use init::{sample_gaussian, WeightInit};
