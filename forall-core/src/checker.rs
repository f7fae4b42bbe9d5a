//! Running a property for many trials and classifying the outcome.

use crate::data::{Config, Seed};
use crate::error::{panic_message, CheckError, GenError, PropertyError};
use crate::property::{PropResult, Testable};
use crate::random;
use std::backtrace::Backtrace;
use std::cell::Cell;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::Once;
use tracing::{debug, trace, warn};

static PANIC_HOOK: Once = Once::new();

thread_local! {
    static CHECKING: Cell<bool> = Cell::new(false);
    static PANIC_SITE: Cell<Option<Backtrace>> = Cell::new(None);
}

/// Install a hook that records where a panic was raised while a check runs
/// on the current thread. The previous hook still runs afterwards.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CHECKING.try_with(Cell::get).unwrap_or(false) {
                let _ = PANIC_SITE.try_with(|site| site.set(Some(Backtrace::force_capture())));
            }
            previous(info);
        }));
    });
}

/// Outcome of checking a property.
///
/// Trial indices are 1-based: a failure on the first trial reports `tests: 1`.
#[derive(Debug)]
pub enum CheckResult<V> {
    /// Every trial passed.
    Passed { tests: usize },

    /// The predicate returned false; `inputs` is the shrunk counterexample.
    Falsified {
        tests: usize,
        inputs: V,
        shrinks: usize,
    },

    /// The predicate raised an error.
    Error {
        tests: usize,
        inputs: Option<V>,
        error: PropertyError,
    },

    /// A generator exhausted its trial budget.
    FailedToGenerate { tests: usize, attempts: usize },

    /// The checking machinery itself failed.
    Troubled {
        message: String,
        backtrace: Backtrace,
    },
}

impl<V> CheckResult<V> {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckResult::Passed { .. })
    }

    pub fn is_falsified(&self) -> bool {
        matches!(self, CheckResult::Falsified { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CheckResult::Error { .. })
    }

    pub fn has_failed_to_generate(&self) -> bool {
        matches!(self, CheckResult::FailedToGenerate { .. })
    }

    pub fn is_troubled(&self) -> bool {
        matches!(self, CheckResult::Troubled { .. })
    }

    /// The number of trials run, unless the harness failed.
    pub fn tests(&self) -> Option<usize> {
        match self {
            CheckResult::Passed { tests }
            | CheckResult::Falsified { tests, .. }
            | CheckResult::Error { tests, .. }
            | CheckResult::FailedToGenerate { tests, .. } => Some(*tests),
            CheckResult::Troubled { .. } => None,
        }
    }

    /// Transform the inputs carried by this result.
    pub fn map_inputs<U, F>(self, f: F) -> CheckResult<U>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            CheckResult::Passed { tests } => CheckResult::Passed { tests },
            CheckResult::Falsified {
                tests,
                inputs,
                shrinks,
            } => CheckResult::Falsified {
                tests,
                inputs: f(inputs),
                shrinks,
            },
            CheckResult::Error {
                tests,
                inputs,
                error,
            } => CheckResult::Error {
                tests,
                inputs: inputs.map(f),
                error,
            },
            CheckResult::FailedToGenerate { tests, attempts } => {
                CheckResult::FailedToGenerate { tests, attempts }
            }
            CheckResult::Troubled { message, backtrace } => {
                CheckResult::Troubled { message, backtrace }
            }
        }
    }
}

/// Runs properties for a fixed number of trials.
#[derive(Debug, Clone)]
pub struct PropChecker {
    count: usize,
    seed: Option<Seed>,
}

impl PropChecker {
    /// Create a checker that runs `count` trials.
    pub fn new(count: usize) -> Result<Self, CheckError> {
        if count < 1 {
            return Err(CheckError::InvalidCount { count });
        }
        Ok(PropChecker { count, seed: None })
    }

    /// Create a checker from a config, reseeding the random source before
    /// every check when the config carries a seed.
    pub fn from_config(config: &Config) -> Result<Self, CheckError> {
        let mut checker = PropChecker::new(config.test_limit)?;
        checker.seed = config.seed;
        Ok(checker)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Check `prop`, stopping at the first trial that does not pass.
    ///
    /// A panic escaping the property's `execute` is reported as
    /// [`CheckResult::Troubled`] instead of unwinding into the caller, with
    /// the backtrace taken where the panic was raised.
    pub fn check<P>(&self, prop: &P) -> CheckResult<P::Value>
    where
        P: Testable + ?Sized,
    {
        if let Some(seed) = self.seed {
            random::reseed(seed);
        }

        install_panic_hook();
        let outer = CHECKING.with(|checking| checking.replace(true));
        let outcome = catch_unwind(AssertUnwindSafe(|| self.run(prop)));
        CHECKING.with(|checking| checking.set(outer));
        let panic_site = PANIC_SITE.with(Cell::take);

        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(%message, "checker caught a panic outside the property");
                CheckResult::Troubled {
                    message,
                    backtrace: panic_site.unwrap_or_else(Backtrace::capture),
                }
            }
        }
    }

    fn run<P>(&self, prop: &P) -> CheckResult<P::Value>
    where
        P: Testable + ?Sized,
    {
        for trial in 1..=self.count {
            match prop.execute() {
                PropResult::Finished { is_valid: true, .. } => {
                    trace!(trial, "trial passed");
                }
                PropResult::Finished {
                    name,
                    inputs,
                    shrinks,
                    ..
                } => {
                    debug!(property = %name, trial, shrinks, "property falsified");
                    return CheckResult::Falsified {
                        tests: trial,
                        inputs,
                        shrinks,
                    };
                }
                PropResult::Stopped {
                    error: PropertyError::Generation(GenError::Exhausted { attempts }),
                    name,
                    ..
                } => {
                    debug!(property = %name, trial, attempts, "generator exhausted");
                    return CheckResult::FailedToGenerate {
                        tests: trial,
                        attempts,
                    };
                }
                PropResult::Stopped {
                    name,
                    inputs,
                    error,
                } => {
                    debug!(property = %name, trial, %error, "property raised an error");
                    return CheckResult::Error {
                        tests: trial,
                        inputs,
                        error,
                    };
                }
            }
        }

        CheckResult::Passed { tests: self.count }
    }
}
