use crate::network::connection::Connection;
use crate::network::neuron::{Neuron, NeuronId};

/// Outputs and error signals of every neuron for one set of inputs, targets
/// and weights, indexed by `NeuronId`.
///
/// Filled forward in layer order, then backward in reverse layer order, so
/// each neuron is evaluated exactly once. Holding a snapshot means no weight
/// mutation can leak into values read later.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    outputs: Vec<f64>,
    errors: Vec<f64>,
}

impl Evaluation {
    pub(crate) fn forward(neurons: &[Neuron], layers: &[Vec<NeuronId>], connections: &[Connection]) -> Evaluation {
        let mut outputs = vec![0.0; neurons.len()];
        for layer in layers {
            for &id in layer {
                let y = neurons[id].output(connections, &outputs);
                outputs[id] = y;
            }
        }
        Evaluation { outputs, errors: vec![0.0; neurons.len()] }
    }

    pub(crate) fn backward(&mut self, neurons: &[Neuron], layers: &[Vec<NeuronId>], connections: &[Connection]) {
        for layer in layers.iter().rev() {
            for &id in layer {
                let delta = neurons[id].error(connections, &self.outputs, &self.errors);
                self.errors[id] = delta;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(outputs: Vec<f64>, errors: Vec<f64>) -> Evaluation {
        Evaluation { outputs, errors }
    }

    pub fn output(&self, id: NeuronId) -> f64 {
        self.outputs[id]
    }

    /// Error signal δ; always 0 for input neurons and before `backward` runs.
    pub fn error(&self, id: NeuronId) -> f64 {
        self.errors[id]
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }
}
