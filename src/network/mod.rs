pub mod connection;
pub mod evaluation;
pub mod network;
pub mod neuron;
pub mod spec;

pub use connection::Connection;
pub use evaluation::Evaluation;
pub use network::Network;
pub use neuron::{Neuron, NeuronId, NeuronKind};
pub use spec::NetworkSpec;
