pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod codec;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::{sigmoid, sigmoid_prime, Sigmoid};
pub use layers::dense::Layer;
pub use network::{ForwardTrace, Network, NetworkSpec};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{train_from_file, train_loop, train_network, train_one, EpochStats, TrainConfig, TrainingSet};
pub use error::{Error, Result, VectorKind};
