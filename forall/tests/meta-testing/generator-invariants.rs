//! Generator invariant properties
//!
//! These properties ensure that generators respect their bounds and filters
//! for every argument the engine can throw at them.

use crate::assert_passes;
use chrono::{Datelike, Timelike};
use forall::*;

/// Property: `choose` only yields values between its bounds
pub fn test_choose_stays_in_bounds() {
    let prop = for_all((arb_int(), arb_int()), |&(a, b)| {
        let (lo, hi) = (a.min(b), a.max(b));
        if lo == hi {
            return choose(lo, hi).is_err();
        }
        match choose(lo, hi) {
            Ok(gen) => (0..20).all(|_| match gen.generate() {
                Ok(value) => lo <= value && value <= hi,
                Err(_) => false,
            }),
            Err(_) => false,
        }
    })
    .named("choose_stays_in_bounds");
    assert_passes("choose stays in bounds", &prop, 100);

    let floats = choose(-1.0e6_f64, 1.0e6).unwrap();
    let prop = for_all((from_gen(floats.clone()), from_gen(floats)), |&(a, b)| {
        let (lo, hi) = (a.min(b), a.max(b));
        if lo == hi {
            return true;
        }
        let gen = choose(lo, hi).unwrap();
        (0..20).all(|_| {
            let value = gen.generate().unwrap();
            lo <= value && value <= hi
        })
    });
    assert_passes("choose float bounds", &prop, 100);
}

/// Property: `choose` refuses ranges where min >= max
pub fn test_choose_rejects_inverted_ranges() {
    let prop = for_all((arb_int(), arb_int()), |&(a, b)| {
        a < b || matches!(choose(a, b), Err(GenError::InvalidRange { .. }))
    });
    assert_passes("choose rejects inverted ranges", &prop, 100);
}

/// Property: a filtered generator never yields a rejected value
pub fn test_such_that_only_yields_accepted_values() {
    let divisors = from_gen(choose(1_i64, 10).unwrap());
    let prop = for_all(divisors, |&m| {
        let gen = choose(0_i64, 1000)
            .unwrap()
            .such_that(move |x| x % m == 0, 10_000);
        (0..10).all(|_| matches!(gen.generate(), Ok(value) if value % m == 0))
    });
    assert_passes("such_that yields accepted values", &prop, 50);
}

/// Property: generated characters are outside the surrogate band
pub fn test_chars_are_scalar_values() {
    let prop = for_all(arb_char(), |&c| {
        let code = c as u32;
        code < 0xD800 || (0xE000..=0xFFFF).contains(&code)
    });
    assert_passes("chars are scalar values", &prop, 500);
}

/// Property: generated timestamps are valid calendar dates
pub fn test_dates_are_calendar_dates() {
    let prop = for_all(arb_date(), |date| {
        (1..=9999).contains(&date.year()) && date.second() < 60 && date.nanosecond() == 0
    });
    assert_passes("dates are calendar dates", &prop, 500);
}
