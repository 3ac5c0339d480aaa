use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::network::trace::ForwardTrace;

/// Plain per-example gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be positive and finite, got {learning_rate}"
            )));
        }
        Ok(Sgd { learning_rate })
    }

    /// Applies one update to every layer.
    ///
    /// `errors[l]` are the error terms of network layer `l` (index 0 unused)
    /// and `trace` is the forward pass they were computed from. All errors
    /// must already be computed: updating changes the weights they depend on.
    pub fn step(&self, network: &mut Network, trace: &ForwardTrace, errors: &[Vec<f64>]) {
        for (l, layer) in network.layers.iter_mut().enumerate() {
            layer.apply_gradients(&trace.activations[l], &errors[l + 1], self.learning_rate);
        }
    }
}
