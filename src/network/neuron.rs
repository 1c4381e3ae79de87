use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;

/// A weighted, directed connection from a neuron in the previous layer.
///
/// Edges are positional: edge `j` of a neuron in layer `i` always reads
/// neuron `j` of layer `i - 1`, so a snapshot needs no explicit references
/// and reload reduces to an index check.  `pending_change` is nonzero only
/// between a backward sweep and the weight application that drains it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub weight: f64,
    #[serde(skip)]
    pub pending_change: f64,
}

impl Edge {
    pub fn new(weight: f64) -> Edge {
        Edge {
            weight,
            pending_change: 0.0,
        }
    }

    /// Applies the staged weight correction and drains it to zero.
    pub fn apply_update(&mut self) {
        self.weight -= self.pending_change;
        self.pending_change = 0.0;
    }
}

/// A computational node holding a bias, its incoming edges and an
/// activation pair.
///
/// A neuron with a `preset` reads as that value verbatim; presets feed raw
/// input into layer 0 and bypass edges, bias and activation entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub bias: f64,
    pub preset: Option<f64>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(skip)]
    pub activation: ActivationFunction,
}

impl Neuron {
    /// An input-layer neuron clamped to `value`.
    pub fn with_preset(value: f64, activation: ActivationFunction) -> Neuron {
        Neuron {
            bias: 0.0,
            preset: Some(value),
            edges: Vec::new(),
            activation,
        }
    }

    /// Weighted fan-in over the previous layer's resolved values, plus bias.
    pub fn weighted_input(&self, previous_values: &[f64]) -> f64 {
        let fan_in: f64 = self
            .edges
            .iter()
            .zip(previous_values)
            .map(|(edge, value)| edge.weight * value)
            .sum();
        fan_in + self.bias
    }

    /// Resolves the neuron's value given the previous layer's values.
    pub fn value(&self, previous_values: &[f64]) -> f64 {
        match self.preset {
            Some(preset) => preset,
            None => self
                .activation
                .function(self.weighted_input(previous_values)),
        }
    }
}
