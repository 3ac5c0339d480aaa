use rand::Rng;

use crate::activation::activation::Sigmoid;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// One fully-connected connection between two adjacent network layers.
///
/// `weights` is `(input_size, size)`; `biases` belong to the destination
/// neurons. The input layer has no `Layer` of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: Sigmoid,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let weights = Matrix::random(input_size, size, rng);
        let biases = (0..size).map(|_| rng.gen_range(-1.0..=1.0)).collect();

        Layer {
            size,
            weights,
            biases,
            activator: Sigmoid,
        }
    }

    pub fn from_parts(weights: Matrix, biases: Vec<f64>) -> Result<Layer> {
        if biases.len() != weights.cols {
            return Err(Error::InvalidData(format!(
                "{} biases for a layer of {} neurons",
                biases.len(),
                weights.cols
            )));
        }
        if !weights.is_finite() || biases.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidData("parameters must be finite".to_owned()));
        }

        Ok(Layer {
            size: weights.cols,
            weights,
            biases,
            activator: Sigmoid,
        })
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Pre-activation sums `z = a·W + b` for the given source activations.
    pub fn weighted_inputs(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.vec_mul(input);
        for (zi, b) in z.iter_mut().zip(&self.biases) {
            *zi += b;
        }
        z
    }

    pub fn activate(&self, weighted_inputs: &[f64]) -> Vec<f64> {
        weighted_inputs.iter().map(|&z| self.activator.function(z)).collect()
    }

    /// Pulls this layer's error terms back onto its source neurons:
    /// `out[i] = Σ_j w[i][j] * delta[j]`. The caller still multiplies by σ'(z).
    pub fn back_propagate(&self, delta: &[f64]) -> Vec<f64> {
        self.weights.mul_vec(delta)
    }

    /// Gradient-descent update given the source activations and this
    /// layer's error terms.
    pub fn apply_gradients(&mut self, inputs: &[f64], delta: &[f64], lr: f64) {
        for (b, d) in self.biases.iter_mut().zip(delta) {
            *b -= lr * d;
        }
        for (row, &a) in self.weights.data.iter_mut().zip(inputs) {
            for (w, d) in row.iter_mut().zip(delta) {
                *w -= lr * a * d;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> Layer {
        let weights = Matrix::from_data(vec![vec![0.5, -1.0], vec![2.0, 0.25]]).unwrap();
        Layer::from_parts(weights, vec![0.1, -0.2]).unwrap()
    }

    #[test]
    fn weighted_inputs_add_bias_to_dot_product() {
        let z = layer().weighted_inputs(&[1.0, 2.0]);
        assert!((z[0] - 4.6).abs() < 1e-12);
        assert!((z[1] - (-0.7)).abs() < 1e-12);
    }

    #[test]
    fn apply_gradients_moves_against_error() {
        let mut l = layer();
        l.apply_gradients(&[1.0, 0.0], &[0.5, -1.0], 0.1);
        assert!((l.biases[0] - 0.05).abs() < 1e-12);
        assert!((l.biases[1] - (-0.1)).abs() < 1e-12);
        assert!((l.weights.data[0][0] - 0.45).abs() < 1e-12);
        assert!((l.weights.data[0][1] - (-0.9)).abs() < 1e-12);
        // Zero source activation leaves its outgoing weights alone.
        assert_eq!(l.weights.data[1], vec![2.0, 0.25]);
    }

    #[test]
    fn from_parts_rejects_mismatched_or_non_finite() {
        let w = Matrix::zeros(2, 3);
        assert!(Layer::from_parts(w.clone(), vec![0.0; 2]).is_err());
        assert!(Layer::from_parts(w, vec![0.0, f64::NAN, 0.0]).is_err());
    }
}
