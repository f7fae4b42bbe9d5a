//! Shrinkers: from a counterexample to an ordered list of smaller candidates.
//!
//! Every shrinker returns a finite sequence, and an empty one for values that
//! are already minimal. Candidates come most aggressive first; the property
//! executor adopts the first one that still falsifies the property.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::iter;

/// A finite, ordered sequence of shrink candidates.
pub type Shrinks<T> = Box<dyn Iterator<Item = T>>;

/// Produces smaller candidates for a failing value.
pub trait Shrinker<T> {
    fn shrink(&self, value: &T) -> Shrinks<T>;
}

impl<T, F> Shrinker<T> for F
where
    T: 'static,
    F: Fn(&T) -> Vec<T>,
{
    fn shrink(&self, value: &T) -> Shrinks<T> {
        Box::new(self(value).into_iter())
    }
}

/// The sequence for a value that cannot shrink any further.
pub fn nothing<T: 'static>() -> Shrinks<T> {
    Box::new(iter::empty())
}

/// Alternate elements of `xs` and `ys`, then append whatever is left.
fn interleave<T>(xs: Vec<T>, ys: Vec<T>) -> Vec<T> {
    let mut result = Vec::with_capacity(xs.len() + ys.len());
    let mut xs = xs.into_iter();
    let mut ys = ys.into_iter();
    loop {
        match (xs.next(), ys.next()) {
            (Some(x), Some(y)) => {
                result.push(x);
                result.push(y);
            }
            (Some(x), None) => {
                result.push(x);
                result.extend(xs);
                return result;
            }
            (None, Some(y)) => {
                result.push(y);
                result.extend(ys);
                return result;
            }
            (None, None) => return result,
        }
    }
}

/// Shrinks integers towards zero from both signs.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntShrinker;

impl IntShrinker {
    fn halvings(n: i64) -> Vec<i64> {
        let mut result = Vec::new();
        let mut v = n;
        while v != 0 {
            result.push(v);
            v /= 2;
        }
        result
    }
}

impl Shrinker<i64> for IntShrinker {
    fn shrink(&self, value: &i64) -> Shrinks<i64> {
        let value = *value;
        if value == 0 {
            return nothing();
        }

        // |value - h| < |value| for every halving h, so negation cannot overflow.
        let steps: Vec<i64> = Self::halvings(value / 2)
            .into_iter()
            .map(|h| value - h)
            .collect();
        let negated = steps.iter().map(|n| -n).collect();

        Box::new(iter::once(0).chain(interleave(steps, negated)))
    }
}

/// Shrinks floats towards zero, halving until the step is below [`FloatShrinker::EPSILON`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatShrinker;

impl FloatShrinker {
    pub const EPSILON: f64 = 0.001;

    fn halvings(n: f64) -> Vec<f64> {
        let mut result = Vec::new();
        let mut v = n;
        while v.abs() > Self::EPSILON {
            result.push(v);
            v /= 2.0;
        }
        result
    }
}

impl Shrinker<f64> for FloatShrinker {
    fn shrink(&self, value: &f64) -> Shrinks<f64> {
        let value = *value;
        if value == 0.0 {
            return nothing();
        }
        if !value.is_finite() {
            return Box::new(iter::once(0.0));
        }

        let steps: Vec<f64> = Self::halvings(value / 2.0)
            .into_iter()
            .map(|h| value - h)
            .collect();
        let negated = steps.iter().map(|n| -n).collect();

        Box::new(iter::once(0.0).chain(interleave(steps, negated)))
    }
}

/// Shrinks characters towards `'a'`, `'b'` and `'c'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharShrinker;

impl CharShrinker {
    const POOL: [char; 3] = ['a', 'b', 'c'];
}

impl Shrinker<char> for CharShrinker {
    fn shrink(&self, value: &char) -> Shrinks<char> {
        let value = *value;
        let lowercase = value.is_lowercase();
        Box::new(
            Self::POOL
                .into_iter()
                .filter(move |&candidate| candidate < value || !lowercase),
        )
    }
}

/// Shrinks timestamps by zeroing the least significant nonzero time field.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateShrinker;

impl Shrinker<NaiveDateTime> for DateShrinker {
    fn shrink(&self, value: &NaiveDateTime) -> Shrinks<NaiveDateTime> {
        let time = value.time();
        let truncated = if time.second() != 0 {
            NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
        } else if time.minute() != 0 {
            NaiveTime::from_hms_opt(time.hour(), 0, 0)
        } else if time.hour() != 0 {
            NaiveTime::from_hms_opt(0, 0, 0)
        } else {
            None
        };

        let date = value.date();
        Box::new(truncated.map(|time| date.and_time(time)).into_iter())
    }
}

/// Shrinks lists structurally by dropping one element at a time.
///
/// Candidate `k` is the list without element `k`: the tail first, then the
/// head kept in front of each shrink of the tail. Element values are not
/// shrunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListShrinker;

impl<T> Shrinker<Vec<T>> for ListShrinker
where
    T: Clone + 'static,
{
    fn shrink(&self, value: &Vec<T>) -> Shrinks<Vec<T>> {
        let items = value.clone();
        Box::new((0..items.len()).map(move |skip| {
            let mut candidate = Vec::with_capacity(items.len() - 1);
            candidate.extend_from_slice(&items[..skip]);
            candidate.extend_from_slice(&items[skip + 1..]);
            candidate
        }))
    }
}

/// Shrinks strings through [`ListShrinker`] over their characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrShrinker;

impl Shrinker<String> for StrShrinker {
    fn shrink(&self, value: &String) -> Shrinks<String> {
        let chars: Vec<char> = value.chars().collect();
        Box::new(
            ListShrinker
                .shrink(&chars)
                .map(|candidate| candidate.into_iter().collect()),
        )
    }
}
