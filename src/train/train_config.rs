use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`    — number of full, in-order passes over the training data
/// - `log_every` — emit an `info!` summary every this many epochs (0 = only
///                 the final epoch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    #[serde(default)]
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs, log_every: 0 }
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| Error::InvalidConfig(format!("{path}: {e}")))
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(1)
    }
}
