pub mod strategy;
pub mod trainer;

pub use strategy::{LoggingStrategy, RoundStrategy, Strategy, ThresholdStrategy};
pub use trainer::Expectation;
