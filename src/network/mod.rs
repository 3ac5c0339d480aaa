pub mod network;
pub mod spec;
pub mod trace;

pub use network::Network;
pub use spec::NetworkSpec;
pub use trace::ForwardTrace;
