//! Integration workflows
//!
//! End-to-end checks that go from a property definition through the checker
//! to the rendered report.

use forall::*;

/// Reversing a list twice yields the original list
pub fn test_reverse_round_trip() {
    let prop = for_all(arb_list(arb_int(), DEFAULT_LIST_LENGTH), |xs| {
        let mut ys = xs.clone();
        ys.reverse();
        ys.reverse();
        &ys == xs
    })
    .named("reverse_round_trip");

    let result = PropChecker::new(100).unwrap().check(&prop);
    assert!(result.is_passed());
    assert_eq!(result.to_string(), "OK, passed 100 tests.");
}

/// A property no integer satisfies is falsified and shrunk to zero
pub fn test_unsatisfiable_property_workflow() {
    let prop = for_all(arb_int(), |&x| x != 0 && x == x.wrapping_neg());

    let result = PropChecker::new(100).unwrap().check(&prop);
    match &result {
        CheckResult::Falsified {
            tests,
            inputs,
            shrinks,
        } => {
            assert_eq!(*tests, 1);
            assert_eq!(*inputs, 0);
            assert!(*shrinks >= 1, "expected at least one shrink");
        }
        other => panic!("Expected falsified, got: {other:?}"),
    }
    assert!(result.to_string().starts_with("Falsified after 1 test ("));
    assert!(result.to_string().ends_with("):\n> 0"));
}

/// A filter nothing passes gives up on the first trial
pub fn test_exhaustion_workflow() {
    let gen = choose(-10_i64, 20)
        .unwrap()
        .filter(|x| (-20..-10).contains(x));
    let prop = for_all(from_gen(gen), |&x| x + 2 > x);

    let result = PropChecker::new(100).unwrap().check(&prop);
    assert!(result.has_failed_to_generate());
    assert_eq!(
        result.to_string(),
        "Gave up after only 1 test. 100 arguments failed to be generated."
    );
}

/// A predicate that panics is reported with its input and message
pub fn test_error_workflow() {
    let prop = for_all(arb_int(), |&x| {
        if x < 0 {
            panic!("negative input");
        }
        true
    });

    let result = PropChecker::new(100).unwrap().check(&prop);
    match &result {
        CheckResult::Error { inputs, error, .. } => {
            assert!(matches!(inputs, Some(x) if *x < 0));
            assert!(matches!(error, PropertyError::Panicked(message) if message == "negative input"));
        }
        other => panic!("Expected error, got: {other:?}"),
    }

    let text = result.to_string();
    assert!(text.starts_with("Falsified after "));
    assert!(text.ends_with("with exception:\nproperty panicked: negative input"));
}
