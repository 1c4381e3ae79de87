pub mod activation;
pub mod error;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use error::{Error, Result};
pub use network::network::{Layer, Network};
pub use network::neuron::{Edge, Neuron};
pub use train::strategy::{LoggingStrategy, RoundStrategy, Strategy, ThresholdStrategy};
pub use train::trainer::Expectation;
