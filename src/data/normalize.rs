use serde::{Deserialize, Serialize};

use crate::data::sample::Sample;
use crate::error::{NetworkError, Result};

/// Axis-aligned extent of a 2D dataset, used to rescale inputs into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds over the 2D inputs of every sample.
    ///
    /// Fails with `InputSizeMismatch` if any sample's input is not 2D.
    pub fn of(samples: &[Sample]) -> Result<Bounds> {
        if samples.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        if let Some(bad) = samples.iter().find(|s| s.input.len() != 2) {
            return Err(NetworkError::InputSizeMismatch { expected: 2, got: bad.input.len() });
        }
        let init = Bounds {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        Ok(samples.iter().fold(init, |b, s| Bounds {
            min_x: b.min_x.min(s.input[0]),
            max_x: b.max_x.max(s.input[0]),
            min_y: b.min_y.min(s.input[1]),
            max_y: b.max_y.max(s.input[1]),
        }))
    }

    /// Maps a point of the original space into the unit square.
    ///
    /// A zero-width axis divides by zero and yields a non-finite coordinate.
    pub fn normalize(&self, x: f64, y: f64) -> [f64; 2] {
        [
            (x - self.min_x) / (self.max_x - self.min_x),
            (y - self.min_y) / (self.max_y - self.min_y),
        ]
    }

    /// Inverse of `normalize`, for plotting predictions in dataset coordinates.
    pub fn denormalize(&self, u: f64, v: f64) -> [f64; 2] {
        [
            self.min_x + u * (self.max_x - self.min_x),
            self.min_y + v * (self.max_y - self.min_y),
        ]
    }
}

/// Rescales every sample's 2D input in place and returns the original bounds.
pub fn normalize_samples(samples: &mut [Sample]) -> Result<Bounds> {
    let bounds = Bounds::of(samples)?;
    for sample in samples.iter_mut() {
        let [x, y] = bounds.normalize(sample.input[0], sample.input[1]);
        sample.input[0] = x;
        sample.input[1] = y;
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Sample> {
        coords.iter().map(|&(x, y)| Sample::new(vec![x, y], vec![1.0])).collect()
    }

    #[test]
    fn bounds_cover_every_sample() {
        let samples = points(&[(2.0, -1.0), (4.0, 3.0), (3.0, 0.0)]);
        let b = Bounds::of(&samples).unwrap();
        assert_eq!(b, Bounds { min_x: 2.0, max_x: 4.0, min_y: -1.0, max_y: 3.0 });
    }

    #[test]
    fn normalized_inputs_land_in_unit_square() {
        let mut samples = points(&[(2.0, -1.0), (4.0, 3.0), (3.0, 0.0)]);
        let bounds = normalize_samples(&mut samples).unwrap();
        assert_eq!(samples[0].input, vec![0.0, 0.0]);
        assert_eq!(samples[1].input, vec![1.0, 1.0]);
        assert_eq!(samples[2].input, vec![0.5, 0.25]);
        assert_eq!(bounds.denormalize(0.5, 0.25), [3.0, 0.0]);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        assert!(matches!(Bounds::of(&[]), Err(NetworkError::EmptyDataset)));
    }

    #[test]
    fn samples_must_be_two_dimensional() {
        let mut samples = vec![
            Sample::new(vec![0.2, 0.4], vec![1.0]),
            Sample::new(vec![0.5], vec![1.0]),
        ];
        assert!(matches!(
            normalize_samples(&mut samples),
            Err(NetworkError::InputSizeMismatch { expected: 2, got: 1 })
        ));
        // Nothing is rescaled when validation fails.
        assert_eq!(samples[0].input, vec![0.2, 0.4]);

        let wide = [Sample::new(vec![0.1, 0.2, 0.3], vec![0.0])];
        assert!(matches!(
            Bounds::of(&wide),
            Err(NetworkError::InputSizeMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn degenerate_axis_is_not_finite() {
        let b = Bounds::of(&points(&[(1.0, 0.0), (1.0, 2.0)])).unwrap();
        assert!(!b.normalize(1.0, 1.0)[0].is_finite());
    }
}
