/// Everything one forward pass computed, indexed by layer.
///
/// `activations[0]` is the input vector as given; `weighted_inputs[0]` is
/// empty because the input layer has no pre-activation sums.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    pub activations: Vec<Vec<f64>>,
    pub weighted_inputs: Vec<Vec<f64>>,
}

impl ForwardTrace {
    /// Activations of the output layer.
    pub fn output(&self) -> &[f64] {
        self.activations.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_output(mut self) -> Vec<f64> {
        self.activations.pop().unwrap_or_default()
    }

    pub fn last_layer(&self) -> usize {
        self.activations.len() - 1
    }
}
