use crate::activation::{clamp_output, Sigmoid};
use crate::network::connection::Connection;

/// Index of a neuron inside its network.
pub type NeuronId = usize;

/// What a neuron does with its weighted inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum NeuronKind {
    /// Graph leaf whose output is an externally assigned value.
    Input { name: String, input: f64 },
    /// Sigmoid unit between the input and output layers.
    Hidden,
    /// Clamped linear unit; `target` is only read while training.
    Output { target: f64 },
}

#[derive(Debug, Clone)]
pub struct Neuron {
    pub id: NeuronId,
    pub kind: NeuronKind,
    /// Indices into the network's connection list, in creation order.
    pub inputs: Vec<usize>,
    pub outputs: Vec<usize>,
}

impl Neuron {
    pub fn new(id: NeuronId, kind: NeuronKind) -> Neuron {
        Neuron { id, kind, inputs: Vec::new(), outputs: Vec::new() }
    }

    pub fn input(id: NeuronId, name: impl Into<String>, input: f64) -> Neuron {
        Neuron::new(id, NeuronKind::Input { name: name.into(), input })
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NeuronKind::Input { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, NeuronKind::Input { .. })
    }

    pub fn is_output(&self) -> bool {
        matches!(self.kind, NeuronKind::Output { .. })
    }

    /// Σ weight · y(source) over incoming connections; inputs report their value.
    ///
    /// `outputs` holds the already computed outputs of every upstream neuron.
    pub fn weighted_inputs(&self, connections: &[Connection], outputs: &[f64]) -> f64 {
        match &self.kind {
            NeuronKind::Input { input, .. } => *input,
            _ => self.inputs.iter()
                .map(|&c| connections[c].weight * outputs[connections[c].source])
                .sum(),
        }
    }

    pub fn output(&self, connections: &[Connection], outputs: &[f64]) -> f64 {
        match &self.kind {
            NeuronKind::Input { input, .. } => *input,
            NeuronKind::Hidden => Sigmoid::function(self.weighted_inputs(connections, outputs)),
            NeuronKind::Output { .. } => clamp_output(self.weighted_inputs(connections, outputs)),
        }
    }

    /// Backpropagated error signal δ.
    ///
    /// Needs this neuron's own output and the errors of every downstream
    /// neuron. Input neurons have nothing upstream to blame and report 0.
    pub fn error(&self, connections: &[Connection], outputs: &[f64], errors: &[f64]) -> f64 {
        let y = outputs[self.id];
        match &self.kind {
            NeuronKind::Input { .. } => 0.0,
            NeuronKind::Hidden => {
                let downstream: f64 = self.outputs.iter()
                    .map(|&c| connections[c].weight * errors[connections[c].destination])
                    .sum();
                Sigmoid::derivative_from_output(y) * downstream
            }
            NeuronKind::Output { target } => Sigmoid::derivative_from_output(y) * (target - y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 → 1 → 2 chain: input, hidden, output.
    fn chain() -> (Vec<Neuron>, Vec<Connection>) {
        let mut neurons = vec![
            Neuron::input(0, "x", 2.0),
            Neuron::new(1, NeuronKind::Hidden),
            Neuron::new(2, NeuronKind::Output { target: 1.0 }),
        ];
        let connections = vec![Connection::new(0, 1, 0.5), Connection::new(1, 2, 0.8)];
        neurons[0].outputs.push(0);
        neurons[1].inputs.push(0);
        neurons[1].outputs.push(1);
        neurons[2].inputs.push(1);
        (neurons, connections)
    }

    #[test]
    fn kinds_compute_their_own_outputs() {
        let (neurons, connections) = chain();
        let mut outputs = vec![0.0; 3];
        for n in &neurons {
            outputs[n.id] = n.output(&connections, &outputs);
        }
        assert_eq!(outputs[0], 2.0);
        assert!((outputs[1] - Sigmoid::function(1.0)).abs() < 1e-15);
        assert!((outputs[2] - 0.8 * Sigmoid::function(1.0)).abs() < 1e-15);
        assert_eq!(neurons[0].name(), Some("x"));
        assert_eq!(neurons[1].name(), None);
    }

    #[test]
    fn hidden_error_pulls_from_downstream() {
        let (neurons, connections) = chain();
        let outputs = vec![2.0, 0.7, 0.56];
        let mut errors = vec![0.0; 3];
        for n in neurons.iter().rev() {
            errors[n.id] = n.error(&connections, &outputs, &errors);
        }
        let out_err = 0.56 * (1.0 - 0.56) * (1.0 - 0.56);
        assert!((errors[2] - out_err).abs() < 1e-15);
        assert!((errors[1] - 0.7 * 0.3 * 0.8 * out_err).abs() < 1e-15);
        assert_eq!(errors[0], 0.0);
    }
}
