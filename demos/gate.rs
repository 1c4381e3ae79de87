use std::io;
use std::time::Duration;

use filament_nn::{ActivationFunction, Expectation, LoggingStrategy, Network, ThresholdStrategy};

fn main() {
    let mut network = Network::new(ActivationFunction::Logistic, &[2, 3, 1]);

    let samples = vec![
        Expectation::new(vec![0.0, 0.0], vec![0.0]),
        Expectation::new(vec![0.0, 1.0], vec![1.0]),
        Expectation::new(vec![1.0, 0.0], vec![1.0]),
        Expectation::new(vec![1.0, 1.0], vec![0.0]),
    ];

    let strategy = LoggingStrategy::new(
        io::stderr(),
        ThresholdStrategy::with_deadline(0.05, Duration::from_secs(10)),
    );
    network
        .train(&samples, 0.8, strategy)
        .expect("sample dimensions match the network");

    for sample in &samples {
        let out = network.output(&sample.input).expect("input dimension matches");
        println!(
            "{:?} -> {:.4} (want {:.1})",
            sample.input, out[0], sample.expected[0]
        );
    }

    let blob = network.serialize().expect("trained weights are finite");
    println!("snapshot: {} base64 bytes", blob.len());

    let mut restored =
        Network::deserialize(ActivationFunction::Logistic, &blob).expect("snapshot round trip");
    let check = restored.output(&[1.0, 0.0]).expect("input dimension matches");
    println!("restored network on [1, 0]: {:.4}", check[0]);
}
