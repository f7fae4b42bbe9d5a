//! Core data types for forall property-based testing.

use std::fmt;

/// Seed for the shared random source.
///
/// Checks are only reproducible when a seed is given explicitly;
/// nothing in the engine seeds the source on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64);

impl Seed {
    /// Create a seed from a fixed value.
    pub fn from_u64(value: u64) -> Self {
        Seed(value)
    }

    /// Get the inner seed value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Draw a fresh seed from the thread-local entropy source.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed(rng.gen())
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", self.0)
    }
}

/// Configuration for checking properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of trials to run.
    pub test_limit: usize,

    /// Maximum number of shrink rounds per falsified trial.
    pub shrink_limit: usize,

    /// Seed applied to the random source before the first trial.
    pub seed: Option<Seed>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Create a new config that reseeds the random source before checking.
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }
}
