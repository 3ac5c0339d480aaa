pub mod backprop;
pub mod dataset;
pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use backprop::train_one;
pub use dataset::TrainingSet;
pub use epoch_stats::EpochStats;
pub use loop_fn::train_loop;
pub use train_config::TrainConfig;
pub use trainer::{train_from_file, train_network};
