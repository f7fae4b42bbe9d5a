//! Distribution validation
//!
//! Statistical checks on the weighted and uniform choice combinators, and
//! reproducibility of seeded random streams.

use crate::{arbitrary_seed, assert_passes};
use forall::*;

const SAMPLES: usize = 10_000;

fn share<T: PartialEq>(samples: &[T], value: &T) -> f64 {
    samples.iter().filter(|&sample| sample == value).count() as f64 / samples.len() as f64
}

/// Weighted choice follows its weights within five percentage points
pub fn test_frequency_weights() {
    random::reseed(Seed::from_u64(2024));
    let gen = frequency(vec![
        (5, constant('a')),
        (3, constant('b')),
        (2, constant('c')),
    ])
    .unwrap();

    let samples: Vec<char> = (0..SAMPLES).map(|_| gen.generate().unwrap()).collect();

    for (value, expected) in [('a', 0.5), ('b', 0.3), ('c', 0.2)] {
        let actual = share(&samples, &value);
        assert!(
            (actual - expected).abs() < 0.05,
            "'{value}' drawn {actual:.3} of the time, expected {expected}"
        );
    }
}

/// Uniform choice picks every branch about equally often
pub fn test_one_of_uniformity() {
    random::reseed(Seed::from_u64(7));
    let gen = one_of(vec![constant(1_u8), constant(2), constant(3)]).unwrap();

    let samples: Vec<u8> = (0..SAMPLES).map(|_| gen.generate().unwrap()).collect();

    for value in 1..=3 {
        let actual = share(&samples, &value);
        assert!(
            (actual - 1.0 / 3.0).abs() < 0.05,
            "{value} drawn {actual:.3} of the time"
        );
    }
}

/// Property: reseeding with the same seed repeats the same values
pub fn test_seeded_runs_repeat() {
    let prop = for_all_no_shrink(arbitrary_seed(), |&seed| {
        let draw = || -> Vec<i64> {
            random::reseed(seed);
            (0..5).filter_map(|_| arb_int().arbitrary().ok()).collect()
        };
        let first = draw();
        first.len() == 5 && first == draw()
    });
    assert_passes("seeded runs repeat", &prop, 20);
}
