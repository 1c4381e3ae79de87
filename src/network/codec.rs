use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::network::network::Network;

impl Network {
    /// Produces a transportable snapshot of the network: bias, preset and
    /// edge weights per neuron in layer order, JSON-encoded and wrapped in
    /// standard base64.  Activation identity and staged pending changes are
    /// not part of the snapshot; the former is re-selected at load time,
    /// the latter is always zero between training calls.
    pub fn serialize(&self) -> Result<String> {
        self.check_finite()?;
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Restores a snapshot produced by [`Network::serialize`], attaching
    /// `activation` to every reloaded neuron and validating the positional
    /// edge wiring against the reloaded layer sizes.
    pub fn deserialize(activation: ActivationFunction, encoded: &str) -> Result<Network> {
        let json = STANDARD.decode(encoded.trim())?;
        let mut network: Network = serde_json::from_slice(&json)?;
        network.reconnect(activation)?;
        Ok(network)
    }

    // JSON has no representation for NaN or infinity; serde_json would
    // silently emit null, so the snapshot is rejected up front instead.
    fn check_finite(&self) -> Result<()> {
        for (position, layer) in self.layers.iter().enumerate() {
            for (index, neuron) in layer.neurons.iter().enumerate() {
                if !neuron.bias.is_finite() {
                    return Err(Error::NonFinite {
                        field: "bias",
                        layer: position,
                        neuron: index,
                    });
                }
                if let Some(preset) = neuron.preset {
                    if !preset.is_finite() {
                        return Err(Error::NonFinite {
                            field: "preset",
                            layer: position,
                            neuron: index,
                        });
                    }
                }
                for edge in &neuron.edges {
                    if !edge.weight.is_finite() {
                        return Err(Error::NonFinite {
                            field: "weight",
                            layer: position,
                            neuron: index,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn reconnect(&mut self, activation: ActivationFunction) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(Error::TooFewLayers {
                got: self.layers.len(),
            });
        }

        for position in 0..self.layers.len() {
            let want = if position == 0 {
                0
            } else {
                self.layers[position - 1].size()
            };
            for (index, neuron) in self.layers[position].neurons.iter_mut().enumerate() {
                neuron.activation = activation;
                if neuron.edges.len() != want {
                    return Err(Error::Reconnect {
                        layer: position,
                        neuron: index,
                        want,
                        got: neuron.edges.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
