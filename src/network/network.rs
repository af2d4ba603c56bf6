use rand::Rng;
use tracing::{debug, trace};

use crate::error::{NetworkError, Result};
use crate::math::init::WeightInit;
use crate::network::connection::Connection;
use crate::network::evaluation::Evaluation;
use crate::network::neuron::{Neuron, NeuronId, NeuronKind};

pub const DEFAULT_LEARN_RATE: f64 = 0.01;
pub const BIAS_NAME: &str = "bias";

/// Three-layer fully-connected network: inputs (plus bias), one hidden layer, outputs.
///
/// Owns every neuron and connection. The topology is fixed at construction;
/// only connection weights change afterwards, and only through `train`.
#[derive(Debug, Clone)]
pub struct Network {
    neurons: Vec<Neuron>,
    layers: Vec<Vec<NeuronId>>,
    connections: Vec<Connection>,
    learn_rate: f64,
}

impl Network {
    /// Builds a network with uniform [0, 1) random weights.
    ///
    /// `layer_counts` is `[inputs, hidden, outputs]`, excluding the bias neuron.
    /// When `weights` is given it must hold one value per connection, in
    /// creation order (see `weights`).
    pub fn new<S: AsRef<str>>(
        layer_counts: [usize; 3],
        input_names: &[S],
        weights: Option<&[f64]>,
    ) -> Result<Network> {
        let mut network = Network::with_init(
            layer_counts,
            input_names,
            WeightInit::Uniform,
            &mut rand::thread_rng(),
        )?;
        if let Some(weights) = weights {
            network.set_weights(weights)?;
        }
        Ok(network)
    }

    /// Builds a network drawing every initial weight from `init` with `rng`.
    pub fn with_init<S: AsRef<str>, R: Rng + ?Sized>(
        layer_counts: [usize; 3],
        input_names: &[S],
        init: WeightInit,
        rng: &mut R,
    ) -> Result<Network> {
        if let Some(layer) = layer_counts.iter().position(|&n| n == 0) {
            return Err(NetworkError::EmptyLayer { layer });
        }
        let [input_count, hidden_count, output_count] = layer_counts;
        if input_names.len() != input_count {
            return Err(NetworkError::InputNameCountMismatch {
                expected: input_count,
                got: input_names.len(),
            });
        }

        let mut neurons = Vec::with_capacity(input_count + hidden_count + output_count + 1);
        for name in input_names {
            neurons.push(Neuron::input(neurons.len(), name.as_ref(), 0.0));
        }
        for _ in 0..hidden_count {
            neurons.push(Neuron::new(neurons.len(), NeuronKind::Hidden));
        }
        for _ in 0..output_count {
            neurons.push(Neuron::new(neurons.len(), NeuronKind::Output { target: 0.0 }));
        }
        let bias = neurons.len();
        neurons.push(Neuron::input(bias, BIAS_NAME, 1.0));

        let hidden_start = input_count;
        let output_start = input_count + hidden_count;
        let mut input_layer: Vec<NeuronId> = (0..input_count).collect();
        input_layer.push(bias);
        let layers = vec![
            input_layer,
            (hidden_start..output_start).collect(),
            (output_start..bias).collect(),
        ];

        // Source-major over each adjacent layer pair.
        let mut connections = Vec::new();
        for pair in layers.windows(2) {
            for &source in &pair[0] {
                for &destination in &pair[1] {
                    let index = connections.len();
                    connections.push(Connection::new(source, destination, init.sample(rng)));
                    neurons[source].outputs.push(index);
                    neurons[destination].inputs.push(index);
                }
            }
        }

        debug!(
            inputs = input_count,
            hidden = hidden_count,
            outputs = output_count,
            connections = connections.len(),
            ?init,
            "built network"
        );

        Ok(Network { neurons, layers, connections, learn_rate: DEFAULT_LEARN_RATE })
    }

    /// Assigns externally supplied input values; the bias neuron is not part of `values`.
    pub fn set_inputs(&mut self, values: &[f64]) -> Result<()> {
        let expected = self.input_count();
        if values.len() != expected {
            return Err(NetworkError::InputSizeMismatch { expected, got: values.len() });
        }
        for (&id, &value) in self.layers[0].iter().zip(values) {
            if let NeuronKind::Input { input, .. } = &mut self.neurons[id].kind {
                *input = value;
            }
        }
        Ok(())
    }

    /// Sets the inputs and runs a forward pass, returning each output neuron's value.
    pub fn get_output(&mut self, values: &[f64]) -> Result<Vec<f64>> {
        self.set_inputs(values)?;
        let eval = self.forward();
        Ok(self.layers[2].iter().map(|&id| eval.output(id)).collect())
    }

    /// One online backpropagation step towards `expected`.
    ///
    /// Every connection's delta is computed from the same pre-update state
    /// before any weight is changed.
    pub fn train(&mut self, values: &[f64], expected: &[f64]) -> Result<()> {
        let output_count = self.output_count();
        if expected.len() != output_count {
            return Err(NetworkError::TargetSizeMismatch {
                expected: output_count,
                got: expected.len(),
            });
        }
        self.set_inputs(values)?;
        for (&id, &value) in self.layers[2].iter().zip(expected) {
            if let NeuronKind::Output { target } = &mut self.neurons[id].kind {
                *target = value;
            }
        }

        let eval = self.evaluate();
        let deltas: Vec<f64> = self.connections.iter()
            .map(|conn| conn.delta_weight(self.learn_rate, &eval))
            .collect();
        for (conn, delta) in self.connections.iter_mut().zip(deltas) {
            conn.weight += delta;
        }

        trace!(?values, ?expected, "trained one sample");
        Ok(())
    }

    /// Forward and backward pass over the current inputs, targets and weights.
    pub fn evaluate(&self) -> Evaluation {
        let mut eval = self.forward();
        eval.backward(&self.neurons, &self.layers, &self.connections);
        eval
    }

    fn forward(&self) -> Evaluation {
        Evaluation::forward(&self.neurons, &self.layers, &self.connections)
    }

    /// Flat weight vector in connection-creation order: every (input ∪ bias) ×
    /// hidden pair, then every hidden × output pair, source-major.
    pub fn weights(&self) -> Vec<f64> {
        self.connections.iter().map(|conn| conn.weight).collect()
    }

    /// Replaces every weight; the vector must cover each connection exactly once.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.connections.len() {
            return Err(NetworkError::WeightCountMismatch {
                expected: self.connections.len(),
                got: weights.len(),
            });
        }
        for (conn, &weight) in self.connections.iter_mut().zip(weights) {
            conn.weight = weight;
        }
        Ok(())
    }

    pub fn learn_rate(&self) -> f64 {
        self.learn_rate
    }

    pub fn set_learn_rate(&mut self, learn_rate: f64) {
        self.learn_rate = learn_rate;
    }

    /// `[inputs, hidden, outputs]` as passed at construction (bias excluded).
    pub fn layer_counts(&self) -> [usize; 3] {
        [self.input_count(), self.layers[1].len(), self.output_count()]
    }

    /// Input neurons, bias last.
    pub fn inputs(&self) -> &[NeuronId] {
        &self.layers[0]
    }

    pub fn hidden(&self) -> &[NeuronId] {
        &self.layers[1]
    }

    pub fn outputs(&self) -> &[NeuronId] {
        &self.layers[2]
    }

    pub fn layers(&self) -> &[Vec<NeuronId>] {
        &self.layers
    }

    pub fn bias(&self) -> NeuronId {
        self.neurons.len() - 1
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id]
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Names of the externally fed inputs, in order.
    pub fn input_names(&self) -> Vec<&str> {
        self.layers[0][..self.input_count()].iter()
            .filter_map(|&id| self.neurons[id].name())
            .collect()
    }

    fn input_count(&self) -> usize {
        self.layers[0].len() - 1
    }

    fn output_count(&self) -> usize {
        self.layers[2].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::{Sigmoid, OUTPUT_MAX, OUTPUT_MIN};
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded(layer_counts: [usize; 3], names: &[&str], seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::with_init(layer_counts, names, WeightInit::Uniform, &mut rng).unwrap()
    }

    // Direct transcription of the recursive output definition, no caching.
    fn recursive_output(net: &Network, id: NeuronId) -> f64 {
        let neuron = net.neuron(id);
        let weighted = || -> f64 {
            neuron.inputs.iter()
                .map(|&c| {
                    let conn = &net.connections()[c];
                    conn.weight * recursive_output(net, conn.source)
                })
                .sum()
        };
        match &neuron.kind {
            NeuronKind::Input { input, .. } => *input,
            NeuronKind::Hidden => Sigmoid::function(weighted()),
            NeuronKind::Output { .. } => weighted().min(0.999).max(0.001),
        }
    }

    fn recursive_error(net: &Network, id: NeuronId) -> f64 {
        let neuron = net.neuron(id);
        let y = recursive_output(net, id);
        match &neuron.kind {
            NeuronKind::Input { .. } => 0.0,
            NeuronKind::Hidden => {
                let sum: f64 = neuron.outputs.iter()
                    .map(|&c| {
                        let conn = &net.connections()[c];
                        conn.weight * recursive_error(net, conn.destination)
                    })
                    .sum();
                y * (1.0 - y) * sum
            }
            NeuronKind::Output { target } => y * (1.0 - y) * (target - y),
        }
    }

    #[test]
    fn two_two_one_with_half_weights_matches_hand_computation() {
        let mut net = Network::new([2, 2, 1], &["a", "b"], Some(&[0.5; 8][..])).unwrap();
        let out = net.get_output(&[0.0, 1.0]).unwrap();
        // Each hidden unit sees 0.5·0 + 0.5·1 + 0.5·bias = 1.0.
        let hidden = 1.0 / (1.0 + (-1.0f64).exp());
        let expected = 0.5 * hidden + 0.5 * hidden;
        assert_eq!(out.len(), 1);
        assert!((out[0] - expected).abs() < 1e-12);
        assert!((out[0] - 0.7310585786300049).abs() < 1e-12);
    }

    #[test]
    fn topology_is_fully_connected_in_creation_order() {
        let net = seeded([3, 4, 2], &["x", "y", "z"], 1);
        assert_eq!(net.connection_count(), (3 + 1) * 4 + 4 * 2);
        assert_eq!(net.layer_counts(), [3, 4, 2]);
        assert_eq!(net.inputs().len(), 4);
        assert_eq!(net.bias(), 3 + 4 + 2);
        assert_eq!(*net.inputs().last().unwrap(), net.bias());
        assert_eq!(net.neuron(net.bias()).name(), Some(BIAS_NAME));
        assert_eq!(net.input_names(), vec!["x", "y", "z"]);

        let mut expected_pairs = Vec::new();
        for pair in net.layers().windows(2) {
            for &s in &pair[0] {
                for &d in &pair[1] {
                    expected_pairs.push((s, d));
                }
            }
        }
        let pairs: Vec<_> = net.connections().iter().map(|c| (c.source, c.destination)).collect();
        assert_eq!(pairs, expected_pairs);

        // Each connection is listed once by its source and once by its destination.
        for (index, conn) in net.connections().iter().enumerate() {
            let src = net.neuron(conn.source);
            let dst = net.neuron(conn.destination);
            assert_eq!(src.outputs.iter().filter(|&&c| c == index).count(), 1);
            assert_eq!(dst.inputs.iter().filter(|&&c| c == index).count(), 1);
        }
        for &id in net.inputs() {
            assert!(net.neuron(id).is_input());
            assert!(net.neuron(id).inputs.is_empty());
        }
        for &id in net.outputs() {
            assert!(net.neuron(id).outputs.is_empty());
        }
    }

    #[test]
    fn fresh_weights_are_uniform_in_unit_interval() {
        let net = Network::new([2, 5, 3], &["a", "b"], None).unwrap();
        assert!(net.weights().iter().all(|w| (0.0..1.0).contains(w)));
    }

    #[test]
    fn set_inputs_checks_length_without_counting_bias() {
        let mut net = seeded([2, 2, 1], &["a", "b"], 2);
        assert!(net.set_inputs(&[0.1, 0.2]).is_ok());
        match net.set_inputs(&[0.1, 0.2, 1.0]) {
            Err(NetworkError::InputSizeMismatch { expected, got }) => {
                assert_eq!((expected, got), (2, 3));
            }
            other => panic!("expected InputSizeMismatch, got {other:?}"),
        }
        assert!(matches!(
            net.get_output(&[0.1]),
            Err(NetworkError::InputSizeMismatch { expected: 2, got: 1 })
        ));
        assert!(matches!(
            net.train(&[], &[1.0]),
            Err(NetworkError::InputSizeMismatch { .. })
        ));
    }

    #[test]
    fn train_rejects_wrong_target_length_without_touching_weights() {
        let mut net = seeded([2, 2, 2], &["a", "b"], 3);
        let before = net.weights();
        assert!(matches!(
            net.train(&[0.1, 0.2], &[1.0]),
            Err(NetworkError::TargetSizeMismatch { expected: 2, got: 1 })
        ));
        assert_eq!(net.weights(), before);
    }

    #[test]
    fn bias_output_is_always_one() {
        let mut net = seeded([2, 3, 1], &["a", "b"], 4);
        for values in [[0.0, 0.0], [1.0, -7.5], [1e6, 0.3]] {
            net.set_inputs(&values).unwrap();
            assert_eq!(net.evaluate().output(net.bias()), 1.0);
        }
        net.train(&[0.5, 0.5], &[1.0]).unwrap();
        assert_eq!(net.evaluate().output(net.bias()), 1.0);
    }

    #[test]
    fn repeated_forward_passes_are_bit_identical() {
        let mut net = seeded([2, 6, 3], &["a", "b"], 5);
        let first = net.get_output(&[0.25, 0.75]).unwrap();
        for _ in 0..10 {
            assert_eq!(net.get_output(&[0.25, 0.75]).unwrap(), first);
        }
    }

    #[test]
    fn outputs_stay_within_clamp_bounds() {
        let mut rng = StdRng::seed_from_u64(6);
        for scale in [0.1, 1.0, 50.0, 1e9] {
            let init = WeightInit::Gaussian { mean: 0.0, std_dev: scale };
            let mut net = Network::with_init([2, 4, 3], &["a", "b"], init, &mut rng).unwrap();
            for values in [[0.0, 0.0], [1.0, 1.0], [-3.0, 8.0]] {
                for y in net.get_output(&values).unwrap() {
                    assert!((OUTPUT_MIN..=OUTPUT_MAX).contains(&y), "{y} out of bounds");
                }
            }
        }
    }

    #[test]
    fn forward_pass_never_changes_weights() {
        let mut net = seeded([2, 3, 2], &["a", "b"], 7);
        let before = net.weights();
        net.get_output(&[0.9, 0.1]).unwrap();
        net.evaluate();
        assert_eq!(net.weights(), before);
    }

    #[test]
    fn evaluation_matches_recursive_definition() {
        let mut net = seeded([3, 4, 2], &["a", "b", "c"], 8);
        net.set_learn_rate(0.3);
        net.train(&[0.2, 0.4, 0.6], &[1.0, 0.0]).unwrap();
        net.set_inputs(&[0.9, 0.1, 0.5]).unwrap();
        let eval = net.evaluate();
        for id in 0..net.neurons().len() {
            assert!((eval.output(id) - recursive_output(&net, id)).abs() < 1e-12);
            assert!((eval.error(id) - recursive_error(&net, id)).abs() < 1e-12);
        }
    }

    #[test]
    fn training_step_commits_deltas_from_pre_update_state() {
        let mut net = seeded([2, 3, 2], &["a", "b"], 9);
        net.set_learn_rate(0.7);
        let values = [0.3, 0.8];
        let expected = [1.0, 0.0];

        // Snapshot of outputs and errors before any weight changes.
        net.set_inputs(&values).unwrap();
        let mut staged = net.clone();
        let mut target_ids = staged.outputs().to_vec().into_iter();
        for &t in &expected {
            let id = target_ids.next().unwrap();
            if let NeuronKind::Output { target } = &mut staged.neurons[id].kind {
                *target = t;
            }
        }
        let before = staged.evaluate();
        let old_weights = net.weights();

        net.train(&values, &expected).unwrap();

        for (conn, old) in net.connections().iter().zip(&old_weights) {
            let law = old + 0.7 * before.error(conn.destination) * before.output(conn.source);
            assert!((conn.weight - law).abs() < 1e-15);
        }
    }

    #[test]
    fn interleaved_updates_would_give_a_different_gradient() {
        let mut two_phase = seeded([2, 3, 1], &["a", "b"], 10);
        two_phase.set_learn_rate(1.0);
        let mut interleaved = two_phase.clone();

        two_phase.train(&[0.4, 0.6], &[0.0]).unwrap();

        // Same step, but each weight committed right after its own delta.
        interleaved.set_inputs(&[0.4, 0.6]).unwrap();
        let out = interleaved.outputs()[0];
        interleaved.neurons[out].kind = NeuronKind::Output { target: 0.0 };
        for index in 0..interleaved.connection_count() {
            let eval = interleaved.evaluate();
            let delta = interleaved.connections[index].delta_weight(1.0, &eval);
            interleaved.connections[index].weight += delta;
        }

        assert_ne!(two_phase.weights(), interleaved.weights());
    }

    #[test]
    fn weight_vector_length_is_validated() {
        let connections = (2 + 1) * 2 + 2;
        assert!(matches!(
            Network::new([2, 2, 1], &["a", "b"], Some(&[0.1; 7][..])),
            Err(NetworkError::WeightCountMismatch { expected, got: 7 }) if expected == connections
        ));
        assert!(matches!(
            Network::new([2, 2, 1], &["a", "b"], Some(&[0.1; 9][..])),
            Err(NetworkError::WeightCountMismatch { got: 9, .. })
        ));
        let weights: Vec<f64> = (0..connections).map(|i| i as f64 / 10.0).collect();
        let net = Network::new([2, 2, 1], &["a", "b"], Some(weights.as_slice())).unwrap();
        assert_eq!(net.weights(), weights);
    }

    #[test]
    fn construction_rejects_bad_shapes() {
        assert!(matches!(
            Network::new([2, 0, 1], &["a", "b"], None),
            Err(NetworkError::EmptyLayer { layer: 1 })
        ));
        assert!(matches!(
            Network::new([2, 2, 1], &["a"], None),
            Err(NetworkError::InputNameCountMismatch { expected: 2, got: 1 })
        ));
    }
}
