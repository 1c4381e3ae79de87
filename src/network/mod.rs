pub mod codec;
pub mod network;
pub mod neuron;

pub use network::{Layer, Network};
pub use neuron::{Edge, Neuron};
