use log::debug;

use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::train::strategy::{cumulated, Strategy};

/// One training sample: an input vector and the output it should produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
}

impl Expectation {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> Expectation {
        Expectation { input, expected }
    }
}

impl Network {
    /// Trains the network in place by per-sample gradient descent.
    ///
    /// Every sample is validated against the input and output layer sizes
    /// before any weight is touched.  Each round then walks the samples in
    /// order: clamp the sample's input, run one backward sweep staging the
    /// weight corrections, apply them, and collect the raw per-output
    /// errors (`output - expected`, unsquared).  The accumulated error
    /// vector of a round is handed to `strategy` at the start of the next
    /// one; training ends when the strategy declines to continue.
    pub fn train<S: Strategy>(
        &mut self,
        expectations: &[Expectation],
        learning_rate: f64,
        mut strategy: S,
    ) -> Result<()> {
        for (sample, expectation) in expectations.iter().enumerate() {
            if expectation.input.len() != self.input_size() {
                return Err(Error::SampleInputDimension {
                    sample,
                    want: self.input_size(),
                    got: expectation.input.len(),
                });
            }
            if expectation.expected.len() != self.output_size() {
                return Err(Error::SampleOutputDimension {
                    sample,
                    want: self.output_size(),
                    got: expectation.expected.len(),
                });
            }
        }

        let mut round = 0usize;
        let mut round_errors: Vec<f64> = Vec::new();
        while strategy.should_continue(&round_errors) {
            round_errors.clear();
            for expectation in expectations {
                self.clamp_input(&expectation.input);
                let errors = self.backpropagate(&expectation.expected, learning_rate);
                self.apply_updates();
                round_errors.extend(errors);
            }
            round += 1;
            debug!(
                "round {round}: cumulated error {:.10}",
                cumulated(&round_errors)
            );
        }
        Ok(())
    }

    /// One backward sweep for the currently clamped sample.
    ///
    /// All deltas are computed against a single forward snapshot taken
    /// before the sweep; corrections are only staged on the edges, so no
    /// weight changes until [`Network::apply_updates`] runs.  Returns the
    /// raw per-output errors of the snapshot.
    fn backpropagate(&mut self, expected: &[f64], learning_rate: f64) -> Vec<f64> {
        let (sums, values) = self.forward();
        let last = self.layers.len() - 1;

        let output_errors: Vec<f64> = values[last]
            .iter()
            .zip(expected)
            .map(|(value, want)| value - want)
            .collect();

        // Upstream-delta table for the layer currently being swept.
        let mut deltas: Vec<f64> = Vec::with_capacity(self.layers[last].size());
        for (index, neuron) in self.layers[last].neurons.iter().enumerate() {
            deltas.push(output_errors[index] * neuron.activation.derivative(sums[last][index]));
        }

        for position in (1..=last).rev() {
            let mut upstream = vec![0.0; self.layers[position - 1].size()];
            for (index, neuron) in self.layers[position].neurons.iter_mut().enumerate() {
                let delta = deltas[index];
                for (j, edge) in neuron.edges.iter_mut().enumerate() {
                    edge.pending_change += learning_rate * delta * values[position - 1][j];
                    upstream[j] += delta * edge.weight;
                }
            }

            // The input layer has no incoming edges; the sweep ends there.
            if position > 1 {
                deltas = upstream
                    .iter()
                    .zip(self.layers[position - 1].neurons.iter())
                    .zip(&sums[position - 1])
                    .map(|((up, neuron), sum)| up * neuron.activation.derivative(*sum))
                    .collect();
            }
        }

        output_errors
    }

    /// Applies every staged weight correction and drains it back to zero.
    /// Runs exactly once per sample, strictly after that sample's backward
    /// sweep and before the next sample's sweep begins.
    pub fn apply_updates(&mut self) {
        for layer in &mut self.layers {
            for neuron in &mut layer.neurons {
                for edge in &mut neuron.edges {
                    edge.apply_update();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::train::strategy::{LoggingStrategy, RoundStrategy};

    /// 1-2-1 network with fixed parameters:
    ///
    ///    w1 / h1 \ w3
    ///   in        out
    ///    w2 \ h2 / w4
    fn fixed_network() -> Network {
        let mut network = Network::new(ActivationFunction::Logistic, &[1, 2, 1]);
        network.layers[1].neurons[0].edges[0].weight = 0.3;
        network.layers[1].neurons[0].bias = 0.1;
        network.layers[1].neurons[1].edges[0].weight = 0.7;
        network.layers[1].neurons[1].bias = 0.2;
        network.layers[2].neurons[0].edges[0].weight = 0.4;
        network.layers[2].neurons[0].edges[1].weight = 0.6;
        network.layers[2].neurons[0].bias = 0.3;
        network
    }

    #[test]
    fn single_round_applies_analytic_gradient_step() {
        let f = ActivationFunction::Logistic;
        let learning_rate = 0.5;
        let expected = 0.666;

        let mut network = fixed_network();
        let out = network.output(&[5.0]).unwrap();

        let w1 = 0.3;
        let w2 = 0.7;
        let w3 = 0.4;
        let w4 = 0.6;
        let h1_in = w1 * 5.0 + 0.1;
        let h2_in = w2 * 5.0 + 0.2;
        let h1 = f.function(h1_in);
        let h2 = f.function(h2_in);
        let out_in = w3 * h1 + w4 * h2 + 0.3;

        let delta_out = (out[0] - expected) * f.derivative(out_in);
        let delta_h1 = delta_out * w3 * f.derivative(h1_in);
        let delta_h2 = delta_out * w4 * f.derivative(h2_in);

        network
            .train(
                &[Expectation::new(vec![5.0], vec![expected])],
                learning_rate,
                RoundStrategy::new(1),
            )
            .unwrap();

        let want_w3 = w3 - learning_rate * delta_out * h1;
        let want_w4 = w4 - learning_rate * delta_out * h2;
        let want_w1 = w1 - learning_rate * delta_h1 * 5.0;
        let want_w2 = w2 - learning_rate * delta_h2 * 5.0;

        assert!((network.layers[2].neurons[0].edges[0].weight - want_w3).abs() < 1e-12);
        assert!((network.layers[2].neurons[0].edges[1].weight - want_w4).abs() < 1e-12);
        assert!((network.layers[1].neurons[0].edges[0].weight - want_w1).abs() < 1e-12);
        assert!((network.layers[1].neurons[1].edges[0].weight - want_w2).abs() < 1e-12);
    }

    #[test]
    fn single_round_reduces_squared_error() {
        let expected = 0.666;
        let mut network = fixed_network();

        let before = network.output(&[5.0]).unwrap()[0];
        network
            .train(
                &[Expectation::new(vec![5.0], vec![expected])],
                0.5,
                RoundStrategy::new(1),
            )
            .unwrap();
        let after = network.output(&[5.0]).unwrap()[0];

        let squared = |o: f64| (o - expected) * (o - expected);
        assert!(squared(after) < squared(before));
    }

    #[test]
    fn pending_changes_are_drained_after_training() {
        let mut network = Network::new(ActivationFunction::Logistic, &[2, 3, 2]);
        network
            .train(
                &[
                    Expectation::new(vec![1.0, 0.0], vec![1.0, 0.0]),
                    Expectation::new(vec![0.0, 1.0], vec![0.0, 1.0]),
                ],
                0.5,
                RoundStrategy::new(2),
            )
            .unwrap();

        for layer in &network.layers {
            for neuron in &layer.neurons {
                for edge in &neuron.edges {
                    assert_eq!(edge.pending_change, 0.0);
                }
            }
        }
    }

    #[test]
    fn malformed_samples_are_rejected_before_any_mutation() {
        let mut network = Network::new(ActivationFunction::Logistic, &[1, 2, 1]);
        let snapshot = network.serialize().unwrap();

        let err = network.train(
            &[
                Expectation::new(vec![1.0], vec![1.0]),
                Expectation::new(vec![1.0, 2.0], vec![1.0]),
            ],
            0.5,
            RoundStrategy::new(1),
        );
        assert!(matches!(
            err,
            Err(Error::SampleInputDimension {
                sample: 1,
                want: 1,
                got: 2,
            })
        ));

        let err = network.train(
            &[Expectation::new(vec![1.0], vec![1.0, 2.0])],
            0.5,
            RoundStrategy::new(1),
        );
        assert!(matches!(
            err,
            Err(Error::SampleOutputDimension {
                sample: 0,
                want: 1,
                got: 2,
            })
        ));

        assert_eq!(network.serialize().unwrap(), snapshot);
    }

    #[test]
    fn biases_are_not_part_of_the_gradient_step() {
        let mut network = fixed_network();
        network
            .train(
                &[Expectation::new(vec![5.0], vec![0.666])],
                0.5,
                RoundStrategy::new(1),
            )
            .unwrap();

        assert_eq!(network.layers[1].neurons[0].bias, 0.1);
        assert_eq!(network.layers[1].neurons[1].bias, 0.2);
        assert_eq!(network.layers[2].neurons[0].bias, 0.3);
    }

    #[test]
    fn strategy_sees_one_error_per_output_per_sample() {
        let mut network = Network::new(ActivationFunction::Logistic, &[1, 2, 2]);
        let samples = [
            Expectation::new(vec![0.5], vec![0.0, 1.0]),
            Expectation::new(vec![-0.5], vec![1.0, 0.0]),
        ];

        let mut observed: Vec<usize> = Vec::new();
        let mut rounds = 0;
        network
            .train(&samples, 0.1, |errors: &[f64]| {
                observed.push(errors.len());
                rounds += 1;
                rounds <= 2
            })
            .unwrap();

        // First consult precedes any round; the later ones carry
        // outputs × samples errors.
        assert_eq!(observed, vec![0, 4, 4]);
    }

    #[test]
    fn logging_strategy_reports_once_per_consult() {
        let mut network = Network::new(ActivationFunction::Logistic, &[1, 2, 1]);
        let mut sink = Vec::new();
        network
            .train(
                &[Expectation::new(vec![1.0], vec![0.5])],
                0.5,
                LoggingStrategy::new(&mut sink, RoundStrategy::new(1)),
            )
            .unwrap();

        let report = String::from_utf8(sink).unwrap();
        assert_eq!(report.lines().count(), 2);
        assert!(report.starts_with("cumulated error: 0.0000000000"));
    }
}
