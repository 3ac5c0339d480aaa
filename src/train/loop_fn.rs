use std::time::Instant;

use log::info;

use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_network;

/// Trains `network` for `config.epochs` epochs, each an in-order pass of
/// `train_network`, and returns the statistics of every completed epoch.
///
/// An error from any epoch aborts the loop; earlier epochs stay applied.
pub fn train_loop(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    optimizer: &Sgd,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let train_loss = train_network(network, train_inputs, train_labels, optimizer)?;
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        let periodic = config.log_every > 0 && epoch % config.log_every == 0;
        if periodic || epoch == config.epochs {
            info!(
                "epoch {}/{}: loss = {:.6} ({} ms)",
                stats.epoch, stats.total_epochs, stats.train_loss, stats.elapsed_ms
            );
        }
        history.push(stats);
    }

    Ok(history)
}
