//! Property definitions for property-based testing.

use crate::arbitrary::Arbitrary;
use crate::data::Config;
use crate::error::{panic_message, PropertyError};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, trace};

/// Default cap on shrink rounds per falsified trial.
pub const DEFAULT_MAX_SHRINKS: usize = 100;

/// Name used for properties that were not given one.
pub const DEFAULT_NAME: &str = "property";

/// The outcome of one predicate evaluation.
///
/// Implemented for `bool` and for `Result<bool, E>`; an `Err` counts as the
/// predicate raising an error, not as a falsification.
pub trait Verdict {
    fn into_verdict(self) -> Result<bool, PropertyError>;
}

impl Verdict for bool {
    fn into_verdict(self) -> Result<bool, PropertyError> {
        Ok(self)
    }
}

impl<E> Verdict for Result<bool, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_verdict(self) -> Result<bool, PropertyError> {
        self.map_err(|error| PropertyError::Raised(Box::new(error)))
    }
}

/// The result of executing a property once.
#[derive(Debug)]
pub enum PropResult<V> {
    /// The predicate was evaluated to a verdict.
    Finished {
        name: String,
        inputs: V,
        is_valid: bool,
        shrinks: usize,
    },

    /// Generation or evaluation raised an error.
    ///
    /// `inputs` holds the most recent inputs, which during shrinking are the
    /// candidate being evaluated. It is `None` when generation failed.
    Stopped {
        name: String,
        inputs: Option<V>,
        error: PropertyError,
    },
}

impl<V> PropResult<V> {
    pub fn has_finished(&self) -> bool {
        matches!(self, PropResult::Finished { .. })
    }

    pub fn has_stopped(&self) -> bool {
        matches!(self, PropResult::Stopped { .. })
    }

    /// The name of the property that produced this result.
    pub fn name(&self) -> &str {
        match self {
            PropResult::Finished { name, .. } | PropResult::Stopped { name, .. } => name,
        }
    }

    /// The verdict, if the predicate was evaluated.
    pub fn is_valid(&self) -> Option<bool> {
        match self {
            PropResult::Finished { is_valid, .. } => Some(*is_valid),
            PropResult::Stopped { .. } => None,
        }
    }
}

/// Whether a falsified trial searches for a smaller counterexample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shrinking {
    Enabled,
    Disabled,
}

/// Anything a checker can run trial after trial.
pub trait Testable {
    type Value: fmt::Debug + 'static;

    /// Run one trial.
    fn execute(&self) -> PropResult<Self::Value>;
}

/// A predicate over the values of an [`Arbitrary`].
///
/// Several inputs are expressed with a tuple of arbitraries; the predicate
/// then receives a tuple of values in the same order.
pub struct Property<A, F> {
    name: String,
    arbitrary: A,
    predicate: F,
    max_shrinks: usize,
    shrinking: Shrinking,
}

impl<A, F, R> Property<A, F>
where
    A: Arbitrary,
    F: Fn(&A::Value) -> R,
    R: Verdict,
{
    /// Create a new property from an arbitrary and a predicate.
    pub fn new(arbitrary: A, predicate: F, shrinking: Shrinking) -> Self {
        Property {
            name: DEFAULT_NAME.to_string(),
            arbitrary,
            predicate,
            max_shrinks: DEFAULT_MAX_SHRINKS,
            shrinking,
        }
    }

    /// Name the property in its results.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Cap the number of shrink rounds.
    pub fn with_max_shrinks(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks = max_shrinks;
        self
    }

    /// Apply the shrink limit of `config`.
    pub fn with_config(self, config: &Config) -> Self {
        self.with_max_shrinks(config.shrink_limit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_shrinks(&self) -> usize {
        self.max_shrinks
    }

    /// Generate inputs, evaluate the predicate and shrink on failure.
    pub fn execute(&self) -> PropResult<A::Value> {
        let inputs = match self.generate() {
            Ok(inputs) => inputs,
            Err(error) => return self.stop(None, error),
        };

        match self.evaluate(&inputs) {
            Ok(true) => self.finish(inputs, true, 0),
            Ok(false) => match self.shrinking {
                Shrinking::Enabled => self.shrink_failure(inputs),
                Shrinking::Disabled => self.finish(inputs, false, 0),
            },
            Err(error) => self.stop(Some(inputs), error),
        }
    }

    fn generate(&self) -> Result<A::Value, PropertyError> {
        match catch_unwind(AssertUnwindSafe(|| self.arbitrary.arbitrary())) {
            Ok(generated) => generated.map_err(PropertyError::from),
            Err(payload) => Err(PropertyError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    fn evaluate(&self, inputs: &A::Value) -> Result<bool, PropertyError> {
        match catch_unwind(AssertUnwindSafe(|| (self.predicate)(inputs))) {
            Ok(verdict) => verdict.into_verdict(),
            Err(payload) => Err(PropertyError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    /// Search for a smaller failing input.
    ///
    /// Each round scans the candidates for the current input and adopts the
    /// first one that still fails. The search ends when a candidate equals
    /// the current input, when a round finds nothing smaller, or after
    /// `max_shrinks` rounds.
    fn shrink_failure(&self, inputs: A::Value) -> PropResult<A::Value> {
        let mut last = inputs;
        let mut shrinks = 0;

        'rounds: for round in 0..self.max_shrinks {
            let mut improved = false;

            for candidate in self.arbitrary.shrink(&last) {
                if candidate == last {
                    debug!(property = %self.name, round, shrinks, "shrinking converged");
                    break 'rounds;
                }

                match self.evaluate(&candidate) {
                    Ok(true) => continue,
                    Ok(false) => {
                        trace!(property = %self.name, round, candidate = ?candidate, "adopted smaller counterexample");
                        last = candidate;
                        shrinks += 1;
                        improved = true;
                        break;
                    }
                    Err(error) => return self.stop(Some(candidate), error),
                }
            }

            // Shrinkers are pure; a round without progress is final.
            if !improved {
                debug!(property = %self.name, round, shrinks, "no smaller counterexample");
                break;
            }
        }

        self.finish(last, false, shrinks)
    }

    fn finish(&self, inputs: A::Value, is_valid: bool, shrinks: usize) -> PropResult<A::Value> {
        PropResult::Finished {
            name: self.name.clone(),
            inputs,
            is_valid,
            shrinks,
        }
    }

    fn stop(&self, inputs: Option<A::Value>, error: PropertyError) -> PropResult<A::Value> {
        debug!(property = %self.name, %error, "property stopped");
        PropResult::Stopped {
            name: self.name.clone(),
            inputs,
            error,
        }
    }
}

impl<A, F, R> Testable for Property<A, F>
where
    A: Arbitrary,
    F: Fn(&A::Value) -> R,
    R: Verdict,
{
    type Value = A::Value;

    fn execute(&self) -> PropResult<A::Value> {
        Property::execute(self)
    }
}

impl<A, F> fmt::Debug for Property<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("max_shrinks", &self.max_shrinks)
            .field("shrinking", &self.shrinking)
            .finish()
    }
}

/// Create a property that shrinks its counterexamples.
pub fn for_all<A, F, R>(arbitrary: A, predicate: F) -> Property<A, F>
where
    A: Arbitrary,
    F: Fn(&A::Value) -> R,
    R: Verdict,
{
    for_all_shrink(arbitrary, predicate)
}

/// Create a property that shrinks its counterexamples.
pub fn for_all_shrink<A, F, R>(arbitrary: A, predicate: F) -> Property<A, F>
where
    A: Arbitrary,
    F: Fn(&A::Value) -> R,
    R: Verdict,
{
    Property::new(arbitrary, predicate, Shrinking::Enabled)
}

/// Create a property that reports the first counterexample as is.
pub fn for_all_no_shrink<A, F, R>(arbitrary: A, predicate: F) -> Property<A, F>
where
    A: Arbitrary,
    F: Fn(&A::Value) -> R,
    R: Verdict,
{
    Property::new(arbitrary, predicate, Shrinking::Disabled)
}
