//! Shrinking properties
//!
//! Every shrinker must offer candidates that are no larger than the value it
//! was given, and the executor must use them to land on minimal
//! counterexamples.

use crate::assert_passes;
use forall::*;

/// Property: integer shrinks start at zero and move strictly closer to it
pub fn test_int_shrinks_are_smaller() {
    let prop = for_all(arb_int(), |&n| {
        let shrinks: Vec<i64> = IntShrinker.shrink(&n).collect();
        if n == 0 {
            shrinks.is_empty()
        } else {
            shrinks[0] == 0 && shrinks.iter().all(|c| c.unsigned_abs() < n.unsigned_abs())
        }
    });
    assert_passes("int shrinks are smaller", &prop, 200);
}

/// Property: float shrinks are finite and never larger in magnitude
pub fn test_float_shrinks_are_finite_and_smaller() {
    let prop = for_all(arb_float(), |&x| {
        let shrinks: Vec<f64> = FloatShrinker.shrink(&x).collect();
        if x == 0.0 {
            shrinks.is_empty()
        } else if !x.is_finite() {
            shrinks == vec![0.0]
        } else {
            shrinks[0] == 0.0
                && shrinks
                    .iter()
                    .all(|c| c.is_finite() && c.abs() <= x.abs())
        }
    });
    assert_passes("float shrinks are smaller", &prop, 200);
}

/// Property: each list shrink drops exactly one element
pub fn test_list_shrinks_are_shorter() {
    let prop = for_all(arb_list(arb_int(), 30), |xs| {
        let shrinks: Vec<Vec<i64>> = ListShrinker.shrink(xs).collect();
        shrinks.len() == xs.len()
            && shrinks.iter().all(|c| c.len() + 1 == xs.len())
            && (xs.is_empty() || shrinks[0] == xs[1..])
    });
    assert_passes("list shrinks are shorter", &prop, 100);
}

/// Property: each string shrink drops exactly one character
pub fn test_str_shrinks_are_shorter() {
    let prop = for_all(arb_str(DEFAULT_STR_LENGTH), |s| {
        let length = s.chars().count();
        StrShrinker
            .shrink(s)
            .all(|candidate| candidate.chars().count() + 1 == length)
    });
    assert_passes("str shrinks are shorter", &prop, 100);
}

/// Property: a threshold predicate shrinks to exactly the threshold
pub fn test_shrinking_finds_boundary() {
    let thresholds = from_gen(choose(10_i64, 100_000).unwrap());
    let prop = for_all(thresholds, |&threshold| {
        let inner = for_all(arb_int(), move |&x| x < threshold).with_max_shrinks(200);
        match inner.execute() {
            PropResult::Finished {
                is_valid: false,
                inputs,
                ..
            } => inputs == threshold,
            PropResult::Finished { inputs, .. } => inputs < threshold,
            PropResult::Stopped { .. } => false,
        }
    });
    assert_passes("shrinking finds boundary", &prop, 50);
}
