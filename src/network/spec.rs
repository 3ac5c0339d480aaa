use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::network::network::Network;

/// A JSON-serializable description of a network's topology.
///
/// `layer_sizes[0]` is the input width and the last entry is the output
/// width. When `seed` is set, `build()` is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layer_sizes: Vec<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    pub fn new(layer_sizes: Vec<usize>) -> Self {
        NetworkSpec { layer_sizes, seed: None }
    }

    /// Randomly initializes a network with this topology.
    pub fn build(&self) -> Result<Network> {
        match self.seed {
            Some(seed) => Network::seeded(&self.layer_sizes, seed),
            None => Network::new(&self.layer_sizes),
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| Error::InvalidConfig(format!("{path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_optional_in_json() {
        let spec: NetworkSpec = serde_json::from_str(r#"{"layer_sizes":[16,20,1]}"#).unwrap();
        assert_eq!(spec, NetworkSpec::new(vec![16, 20, 1]));
    }

    #[test]
    fn seeded_spec_builds_the_same_network() {
        let spec = NetworkSpec { layer_sizes: vec![2, 3, 1], seed: Some(11) };
        assert_eq!(spec.build().unwrap(), spec.build().unwrap());
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("sigmoid-nn-spec-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let spec = NetworkSpec { layer_sizes: vec![4, 2], seed: Some(3) };
        spec.save_json(path).unwrap();
        assert_eq!(NetworkSpec::load_json(path).unwrap(), spec);
        std::fs::remove_file(path).unwrap();
    }
}
