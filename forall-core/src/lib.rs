//! Core functionality for forall property-based testing.
//!
//! This crate provides the building blocks of the engine: lazily evaluated
//! generators, per-type arbitraries and shrinkers, the property executor
//! that drives shrinking, and the checker that classifies a run.

pub mod arbitrary;
pub mod checker;
pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod random;
pub mod report;
pub mod shrink;

// Re-export the main types
pub use arbitrary::*;
pub use checker::*;
pub use data::*;
pub use error::{CheckError, ForallError, GenError, PropertyError};
pub use gen::*;
pub use property::*;
pub use report::*;
pub use shrink::*;
