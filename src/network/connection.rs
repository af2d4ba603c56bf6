use serde::{Deserialize, Serialize};

use crate::network::evaluation::Evaluation;
use crate::network::neuron::NeuronId;

/// A weighted directed edge between two neurons of adjacent layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: NeuronId,
    pub destination: NeuronId,
    pub weight: f64,
}

impl Connection {
    pub fn new(source: NeuronId, destination: NeuronId, weight: f64) -> Connection {
        Connection { source, destination, weight }
    }

    /// One-sample SGD step for this edge: lr · δ(destination) · y(source).
    ///
    /// Reads `eval` only; the caller decides when the delta is committed.
    pub fn delta_weight(&self, learn_rate: f64, eval: &Evaluation) -> f64 {
        learn_rate * eval.error(self.destination) * eval.output(self.source)
    }
}
