use serde::{Deserialize, Serialize};

/// Per-epoch training statistics returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean squared error over the epoch, measured before each update.
    pub train_loss: f64,
    pub elapsed_ms: u64,
}
