use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine.  All variants are returned to the caller;
/// none are retried internally and none abort the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Input vector length disagrees with the input layer size.
    #[error("input length {got} does not match input layer size {want}")]
    InputDimension { want: usize, got: usize },

    /// A training sample's input vector disagrees with the input layer size.
    #[error("sample {sample}: input length {got} does not match input layer size {want}")]
    SampleInputDimension {
        sample: usize,
        want: usize,
        got: usize,
    },

    /// A training sample's expected-output vector disagrees with the output
    /// layer size.
    #[error(
        "sample {sample}: expected output length {got} does not match output layer size {want}"
    )]
    SampleOutputDimension {
        sample: usize,
        want: usize,
        got: usize,
    },

    /// A bias, preset or weight is NaN or infinite and cannot be encoded.
    #[error("cannot encode non-finite {field} at layer {layer}, neuron {neuron}")]
    NonFinite {
        field: &'static str,
        layer: usize,
        neuron: usize,
    },

    /// The transport wrapping of a snapshot is not valid base64.
    #[error("malformed snapshot transport encoding: {0}")]
    Transport(#[from] base64::DecodeError),

    /// The structural encoding inside a snapshot is not a valid network.
    #[error("malformed snapshot structure: {0}")]
    Structure(#[from] serde_json::Error),

    /// A reloaded neuron's edge count disagrees with the size of the layer
    /// it should connect to.
    #[error(
        "snapshot is inconsistent: layer {layer}, neuron {neuron} carries {got} edges, \
         previous layer holds {want} neurons"
    )]
    Reconnect {
        layer: usize,
        neuron: usize,
        want: usize,
        got: usize,
    },

    /// A snapshot must describe at least an input and an output layer.
    #[error("snapshot holds {got} layers, need at least 2")]
    TooFewLayers { got: usize },
}
