use std::io::Write;
use std::time::{Duration, Instant};

/// Decides whether training should continue, given the raw per-output
/// errors of the most recent round.  Implementations keep whatever state
/// they need across rounds (round counters, deadlines, a wrapped inner
/// strategy).
pub trait Strategy {
    /// `errors` is empty on the first round, before anything has been
    /// observed.
    fn should_continue(&mut self, errors: &[f64]) -> bool;
}

impl<F> Strategy for F
where
    F: FnMut(&[f64]) -> bool,
{
    fn should_continue(&mut self, errors: &[f64]) -> bool {
        self(errors)
    }
}

/// Sum of absolute per-output errors.
pub(crate) fn cumulated(errors: &[f64]) -> f64 {
    // Fold from an explicit `0.0` identity: `Iterator::sum` for f64 seeds
    // with `-0.0`, which would surface as a "-0.0000000000" sign artifact
    // for an empty error history even though the magnitude is zero.
    errors.iter().map(|e| e.abs()).fold(0.0, |acc, e| acc + e)
}

/// Stops once a fixed number of rounds has elapsed.
#[derive(Debug)]
pub struct RoundStrategy {
    rounds: usize,
    completed: usize,
}

impl RoundStrategy {
    /// `rounds` is clamped to at least one; at least one training round
    /// always executes.
    pub fn new(rounds: usize) -> RoundStrategy {
        RoundStrategy {
            rounds: rounds.max(1),
            completed: 0,
        }
    }
}

impl Strategy for RoundStrategy {
    fn should_continue(&mut self, _errors: &[f64]) -> bool {
        if self.completed == self.rounds {
            false
        } else {
            self.completed += 1;
            true
        }
    }
}

/// Stops once the cumulative absolute error drops to `threshold` or below,
/// or once an optional wall-clock deadline has passed.
#[derive(Debug)]
pub struct ThresholdStrategy {
    threshold: f64,
    deadline: Option<Instant>,
}

impl ThresholdStrategy {
    pub fn new(threshold: f64) -> ThresholdStrategy {
        ThresholdStrategy {
            threshold,
            deadline: None,
        }
    }

    /// Adds a hard deadline that stops training regardless of error, for
    /// targets the network may never reach.
    pub fn with_deadline(threshold: f64, patience: Duration) -> ThresholdStrategy {
        ThresholdStrategy {
            threshold,
            deadline: Some(Instant::now() + patience),
        }
    }
}

impl Strategy for ThresholdStrategy {
    fn should_continue(&mut self, errors: &[f64]) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() > deadline {
                return false;
            }
        }

        // An empty history means no round has run yet; stopping here would
        // end training before the first pass.
        if !errors.is_empty() && cumulated(errors) <= self.threshold {
            return false;
        }
        true
    }
}

/// Wraps another strategy, reporting the cumulative absolute error to a
/// sink on every round and delegating the verdict unchanged.
pub struct LoggingStrategy<W: Write, S: Strategy> {
    sink: W,
    inner: S,
}

impl<W: Write, S: Strategy> LoggingStrategy<W, S> {
    pub fn new(sink: W, inner: S) -> LoggingStrategy<W, S> {
        LoggingStrategy { sink, inner }
    }
}

impl<W: Write, S: Strategy> Strategy for LoggingStrategy<W, S> {
    fn should_continue(&mut self, errors: &[f64]) -> bool {
        // Reporting is user information only; a failed write must not
        // disturb training.
        let _ = writeln!(self.sink, "cumulated error: {:.10}", cumulated(errors));
        self.inner.should_continue(errors)
    }
}
