use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::backprop::train_one;
use crate::train::dataset::TrainingSet;

/// One epoch of online gradient descent over the examples, in order.
/// Returns the mean squared error seen during the pass.
///
/// A malformed example stops training with `Error::InputSize`; updates from
/// the examples before it stay applied.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(Error::InvalidData(format!(
            "{} input vectors but {} expected output vectors",
            inputs.len(),
            expected_outputs.len()
        )));
    }
    if inputs.is_empty() {
        return Ok(0.0);
    }

    let mut total_loss = 0.0;
    for (input, expected) in inputs.iter().zip(expected_outputs) {
        total_loss += train_one(network, input, expected, optimizer)?;
    }

    let mean = total_loss / inputs.len() as f64;
    debug!("trained on {} examples, mean loss {mean:.6}", inputs.len());
    Ok(mean)
}

/// Reads a training file and runs one epoch over it.
pub fn train_from_file<P: AsRef<Path>>(network: &mut Network, path: P, optimizer: &Sgd) -> Result<f64> {
    let set = TrainingSet::load(path)?;
    train_network(network, &set.inputs, &set.expected, optimizer)
}
