//! forall property-based testing library.
//!
//! This is the main entry point for forall, providing a convenient API
//! for declaring properties over generated inputs and checking them.
//!
//! ```
//! use forall::*;
//!
//! let prop = for_all(arb_list(arb_int(), 20), |xs| {
//!     let mut twice = xs.clone();
//!     twice.reverse();
//!     twice.reverse();
//!     twice == *xs
//! });
//!
//! let result = PropChecker::new(100).unwrap().check(&prop);
//! assert_eq!(result.to_string(), "OK, passed 100 tests.");
//! ```

pub use forall_core::*;
