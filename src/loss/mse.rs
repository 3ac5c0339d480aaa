/// Quadratic cost `½‖a − y‖²` per example, reported as the mean squared
/// error. Its gradient with respect to the output activations is `a − y`,
/// the factor backprop multiplies by σ'(z) on the output layer.
pub struct MseLoss;

impl MseLoss {
    /// mean((predicted - expected)²); 0 for empty vectors.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        predicted.iter().zip(expected)
            .map(|(a, y)| (a - y).powi(2))
            .sum::<f64>() / predicted.len() as f64
    }

    /// ∂C/∂a per output: predicted - expected.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected)
            .map(|(a, y)| a - y)
            .collect()
    }
}
