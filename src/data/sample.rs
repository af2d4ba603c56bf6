use serde::{Deserialize, Serialize};

/// One labelled point: network input and the output it should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }

    /// A sample whose target is the one-hot encoding of `class` among `classes`.
    pub fn labelled(input: Vec<f64>, class: usize, classes: usize) -> Sample {
        Sample { input, target: one_hot(classes, class) }
    }
}

/// Vector of `len` zeros with a single 1 at `index`.
pub fn one_hot(len: usize, index: usize) -> Vec<f64> {
    (0..len).map(|i| if i == index { 1.0 } else { 0.0 }).collect()
}

/// Index of the largest value; the first one wins ties. 0 for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
