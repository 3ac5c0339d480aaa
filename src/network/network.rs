use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::codec;
use crate::error::{Error, Result, VectorKind};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::trace::ForwardTrace;

/// Fully-connected sigmoid network.
///
/// `layers[l]` connects network layer `l` to layer `l + 1`, so it carries
/// `weights[l]` and the biases of layer `l + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layer_sizes: Vec<usize>,
    pub(crate) layers: Vec<Layer>,
}

impl Network {
    /// Random network drawn from the thread-local RNG.
    pub fn new(layer_sizes: &[usize]) -> Result<Network> {
        Network::with_rng(layer_sizes, &mut rand::thread_rng())
    }

    /// Reproducible random network.
    pub fn seeded(layer_sizes: &[usize], seed: u64) -> Result<Network> {
        Network::with_rng(layer_sizes, &mut StdRng::seed_from_u64(seed))
    }

    /// Every weight and bias drawn independently from U[-1, 1].
    pub fn with_rng<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Network> {
        validate_topology(layer_sizes)?;
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], rng))
            .collect();
        debug!("initialized network with topology {layer_sizes:?}");

        Ok(Network { layer_sizes: layer_sizes.to_vec(), layers })
    }

    /// Rebuilds a network from explicit parameters.
    ///
    /// `weights[l][i][j]` connects neuron `i` of layer `l` to neuron `j` of
    /// layer `l + 1`. `biases[k]` holds the biases of layer `k + 1`; the
    /// input layer has none.
    pub fn from_parts(
        layer_sizes: &[usize],
        weights: Vec<Vec<Vec<f64>>>,
        biases: Vec<Vec<f64>>,
    ) -> Result<Network> {
        validate_topology(layer_sizes)?;
        let connections = layer_sizes.len() - 1;
        if weights.len() != connections || biases.len() != connections {
            return Err(Error::InvalidData(format!(
                "{} layers need {connections} weight and bias tensors, got {} and {}",
                layer_sizes.len(),
                weights.len(),
                biases.len()
            )));
        }

        let mut layers = Vec::with_capacity(connections);
        for (l, (w, b)) in weights.into_iter().zip(biases).enumerate() {
            let (rows, cols) = (layer_sizes[l], layer_sizes[l + 1]);
            let shape_ok = w.len() == rows && w.iter().all(|row| row.len() == cols);
            if !shape_ok {
                return Err(Error::InvalidData(format!(
                    "weights[{l}] must be {rows}x{cols}"
                )));
            }
            let layer = Layer::from_parts(Matrix::from_data(w)?, b)
                .map_err(|e| Error::InvalidData(format!("layer {}: {e}", l + 1)))?;
            layers.push(layer);
        }

        Ok(Network { layer_sizes: layer_sizes.to_vec(), layers })
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn input_width(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_width(&self) -> usize {
        self.layer_sizes[self.layer_count() - 1]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Weight from neuron `i` of layer `l` to neuron `j` of layer `l + 1`.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn weight(&self, l: usize, i: usize, j: usize) -> f64 {
        self.layers[l].weights.data[i][j]
    }

    /// Bias of neuron `i` in layer `l`.
    ///
    /// # Panics
    /// Panics if `l == 0` (the input layer has no biases) or if `l` or `i`
    /// is out of range.
    pub fn bias(&self, l: usize, i: usize) -> f64 {
        assert!(l >= 1, "the input layer has no biases");
        self.layers[l - 1].biases[i]
    }

    /// Inference only: returns the output layer's activations.
    pub fn forward(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.forward_trace(inputs).map(ForwardTrace::into_output)
    }

    /// Forward pass that keeps every layer's activations and weighted
    /// inputs for the backward pass.
    pub fn forward_trace(&self, inputs: &[f64]) -> Result<ForwardTrace> {
        self.check_width(VectorKind::Input, inputs.len())?;

        let mut activations = Vec::with_capacity(self.layer_count());
        let mut weighted_inputs = Vec::with_capacity(self.layer_count());
        activations.push(inputs.to_vec());
        weighted_inputs.push(Vec::new());

        for (l, layer) in self.layers.iter().enumerate() {
            let z = layer.weighted_inputs(&activations[l]);
            activations.push(layer.activate(&z));
            weighted_inputs.push(z);
        }

        Ok(ForwardTrace { activations, weighted_inputs })
    }

    pub(crate) fn check_width(&self, kind: VectorKind, actual: usize) -> Result<()> {
        let expected = match kind {
            VectorKind::Input => self.input_width(),
            VectorKind::Expected => self.output_width(),
        };
        if actual != expected {
            return Err(Error::InputSize { kind, expected, actual });
        }
        Ok(())
    }

    /// Writes the network in the versioned text format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        codec::write_to(self, &mut writer)?;
        debug!("saved network {:?} to {}", self.layer_sizes, path.display());
        Ok(())
    }

    /// Reads a network previously written by `save`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let network = codec::read_from(std::io::BufReader::new(file))?;
        debug!("loaded network {:?} from {}", network.layer_sizes, path.display());
        Ok(network)
    }
}

fn validate_topology(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(Error::InvalidTopology(format!(
            "need at least 2 layers, got {}",
            layer_sizes.len()
        )));
    }
    if let Some(l) = layer_sizes.iter().position(|&n| n == 0) {
        return Err(Error::InvalidTopology(format!("layer {l} has no neurons")));
    }
    Ok(())
}
