use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::network::neuron::{Edge, Neuron};

/// An ordered group of neurons sharing a depth position.  Order is
/// significant: a neuron's position is the reconnection key on reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    pub fn size(&self) -> usize {
        self.neurons.len()
    }
}

/// A layered, fully-connected feed-forward network.  Layer 0 is the input
/// layer; the last layer is the output layer.  The structure never grows or
/// shrinks after construction; training mutates weights in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network where every layer `i > 0` is fully connected to
    /// layer `i - 1`.  Non-input biases and all edge weights start uniform
    /// random in `[0, 1)`; input neurons start clamped to `1.0` as a
    /// placeholder until the first evaluation overwrites them.
    pub fn new(activation: ActivationFunction, layer_sizes: &[usize]) -> Network {
        let mut rng = rand::thread_rng();
        let mut layers: Vec<Layer> = Vec::with_capacity(layer_sizes.len());

        for (position, &size) in layer_sizes.iter().enumerate() {
            let mut neurons = Vec::with_capacity(size);
            for _ in 0..size {
                if position == 0 {
                    neurons.push(Neuron::with_preset(1.0, activation));
                } else {
                    let fan_in = layers[position - 1].size();
                    let edges = (0..fan_in).map(|_| Edge::new(rng.gen::<f64>())).collect();
                    neurons.push(Neuron {
                        bias: rng.gen::<f64>(),
                        preset: None,
                        edges,
                        activation,
                    });
                }
            }
            layers.push(Layer { neurons });
        }

        Network { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(Layer::size).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(Layer::size).unwrap_or(0)
    }

    /// Clamps `input` into the input layer's presets and reads the value of
    /// every output neuron, in layer order.  The network's weights and
    /// biases are untouched; two calls with the same input and no training
    /// in between return the same output.
    pub fn output(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(Error::InputDimension {
                want: self.input_size(),
                got: input.len(),
            });
        }

        self.clamp_input(input);
        let (_, mut values) = self.forward();
        Ok(values.pop().unwrap_or_default())
    }

    pub(crate) fn clamp_input(&mut self, input: &[f64]) {
        if let Some(first) = self.layers.first_mut() {
            for (neuron, &value) in first.neurons.iter_mut().zip(input) {
                neuron.preset = Some(value);
            }
        }
    }

    /// One forward sweep over the whole network.  Returns per-neuron
    /// pre-activation sums and resolved values, layer by layer; each neuron
    /// is computed once per pass and downstream layers read the cached
    /// value of their predecessors.
    pub(crate) fn forward(&self) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let mut sums: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());
        let mut values: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());

        for (position, layer) in self.layers.iter().enumerate() {
            let previous = if position == 0 {
                &[][..]
            } else {
                &values[position - 1][..]
            };

            let mut layer_sums = Vec::with_capacity(layer.size());
            let mut layer_values = Vec::with_capacity(layer.size());
            for neuron in &layer.neurons {
                let sum = neuron.weighted_input(previous);
                layer_sums.push(sum);
                layer_values.push(match neuron.preset {
                    Some(preset) => preset,
                    None => neuron.activation.function(sum),
                });
            }
            sums.push(layer_sums);
            values.push(layer_values);
        }

        (sums, values)
    }
}
