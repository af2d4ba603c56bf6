use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::init::WeightInit;
use crate::network::network::{Network, DEFAULT_LEARN_RATE};

fn default_learn_rate() -> f64 {
    DEFAULT_LEARN_RATE
}

/// A fully serializable description of a network: its shape, learning rate
/// and, once trained, its flat weight vector.
///
/// The weight vector is the only persisted state; it is applied in
/// connection-creation order when the network is rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the model file stem.
    pub name: String,
    /// `[inputs, hidden, outputs]`, bias excluded.
    pub layer_counts: [usize; 3],
    pub input_names: Vec<String>,
    #[serde(default = "default_learn_rate")]
    pub learn_rate: f64,
    /// Initializer used when `weights` is absent.
    #[serde(default)]
    pub init: WeightInit,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl NetworkSpec {
    /// Builds the described network, seeding fresh weights from the thread RNG.
    pub fn build(&self) -> Result<Network> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        let mut network = Network::with_init(self.layer_counts, self.input_names.as_slice(), self.init, rng)?;
        if let Some(weights) = &self.weights {
            network.set_weights(weights)?;
        }
        network.set_learn_rate(self.learn_rate);
        Ok(network)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Network {
    /// Captures shape, learning rate and current weights under `name`.
    pub fn to_spec(&self, name: impl Into<String>) -> NetworkSpec {
        NetworkSpec {
            name: name.into(),
            layer_counts: self.layer_counts(),
            input_names: self.input_names().into_iter().map(String::from).collect(),
            learn_rate: self.learn_rate(),
            init: WeightInit::default(),
            weights: Some(self.weights()),
        }
    }
}
