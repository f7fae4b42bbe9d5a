//! Error types for forall property-based testing.

use thiserror::Error;

/// Errors raised while drawing a value from a generator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    /// The acceptance predicate rejected every sample within the trial budget.
    #[error("gave up after {attempts} attempts to generate a value")]
    Exhausted { attempts: usize },

    /// `choose` was given bounds with `min >= max`.
    #[error("invalid range: expected min < max, got min = {min}, max = {max}")]
    InvalidRange { min: String, max: String },

    /// `choose` was given a bound with no ordering, such as NaN.
    #[error("bound is not a number: {bound}")]
    NotNumeric { bound: String },

    /// A combinator needs at least one generator (or a positive total weight).
    #[error("{combinator} needs at least one generator with positive weight")]
    Empty { combinator: &'static str },

    /// The raw source could not assemble a value.
    #[error("invalid generated value: {reason}")]
    Invalid { reason: String },
}

impl GenError {
    /// The number of attempts if this is an exhaustion signal.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            GenError::Exhausted { attempts } => Some(*attempts),
            _ => None,
        }
    }
}

/// Errors that stop the evaluation of a property.
#[derive(Error, Debug)]
pub enum PropertyError {
    /// Generating the inputs failed.
    #[error(transparent)]
    Generation(#[from] GenError),

    /// The predicate returned an error.
    #[error("{0}")]
    Raised(Box<dyn std::error::Error + Send + Sync>),

    /// The predicate panicked.
    #[error("property panicked: {0}")]
    Panicked(String),
}

impl PropertyError {
    /// Whether this error is a generator running out of its trial budget.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PropertyError::Generation(GenError::Exhausted { .. }))
    }
}

/// Errors in how a checker was set up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("trial count must be at least 1, got {count}")]
    InvalidCount { count: usize },
}

/// Umbrella error for forall operations.
#[derive(Error, Debug)]
pub enum ForallError {
    #[error("invalid checker: {0}")]
    Check(#[from] CheckError),

    #[error("invalid generator: {0}")]
    Generator(#[from] GenError),
}

/// Result type for forall operations.
pub type Result<T> = std::result::Result<T, ForallError>;

/// Render a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_tag() {
        let error = PropertyError::from(GenError::Exhausted { attempts: 100 });
        assert!(error.is_exhausted());
        assert_eq!(GenError::Exhausted { attempts: 7 }.attempts(), Some(7));
        assert_eq!(
            GenError::Empty {
                combinator: "one_of"
            }
            .attempts(),
            None
        );
    }

    #[test]
    fn test_raised_is_not_exhaustion() {
        let error = PropertyError::Panicked("boom".to_string());
        assert!(!error.is_exhausted());
        assert_eq!(error.to_string(), "property panicked: boom");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_umbrella_conversion() {
        let error: ForallError = CheckError::InvalidCount { count: 0 }.into();
        assert_eq!(
            error.to_string(),
            "invalid checker: trial count must be at least 1, got 0"
        );
    }
}
