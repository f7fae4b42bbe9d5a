//! Generator combinators for property-based testing.

use crate::error::GenError;
use crate::random;
use rand::distributions::uniform::SampleUniform;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Default number of rejected samples a filtered generator tolerates.
pub const DEFAULT_TRIALS: usize = 100;

type Source<T> = Rc<dyn Fn() -> Result<T, GenError>>;
type Predicate<T> = Rc<dyn Fn(&T) -> bool>;

/// A restartable source of random values of type `T`.
///
/// A generator pairs an infinite raw source with an acceptance predicate and
/// a trial budget. Combinators build new generators that share the raw
/// source; nothing is mutated after construction, so one generator can be
/// reused across every trial of a check.
pub struct Gen<T> {
    source: Source<T>,
    predicate: Predicate<T>,
    trials: usize,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            source: Rc::clone(&self.source),
            predicate: Rc::clone(&self.predicate),
            trials: self.trials,
        }
    }
}

impl<T> fmt::Debug for Gen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gen").field("trials", &self.trials).finish()
    }
}

impl<T: 'static> Gen<T> {
    /// Create a generator from an infallible raw source.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Gen::try_new(move || Ok(f()))
    }

    /// Create a generator from a raw source that may fail to build a value.
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn() -> Result<T, GenError> + 'static,
    {
        Gen {
            source: Rc::new(f),
            predicate: Rc::new(|_| true),
            trials: DEFAULT_TRIALS,
        }
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move || value.clone())
    }

    /// Draw one value that satisfies the acceptance predicate.
    ///
    /// Rejected samples are redrawn. Once `trials` samples have been
    /// rejected the generator gives up with [`GenError::Exhausted`].
    pub fn generate(&self) -> Result<T, GenError> {
        let mut attempts = 0;
        loop {
            let value = (self.source)()?;
            if (self.predicate)(&value) {
                return Ok(value);
            }
            if attempts >= self.trials {
                return Err(GenError::Exhausted { attempts });
            }
            attempts += 1;
        }
    }

    /// The rejection budget of this generator.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Map a function over the accepted values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        Gen::try_new(move || self.generate().map(&f))
    }

    /// Restrict the generator to values satisfying `predicate`.
    ///
    /// The returned generator shares the raw source, keeps any existing
    /// predicate and gets a fresh budget of `trials` rejections.
    pub fn such_that<P>(self, predicate: P, trials: usize) -> Gen<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let existing = self.predicate;
        Gen {
            source: self.source,
            predicate: Rc::new(move |value| existing(value) && predicate(value)),
            trials,
        }
    }

    /// [`Gen::such_that`] with the default budget.
    pub fn filter<P>(self, predicate: P) -> Gen<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.such_that(predicate, DEFAULT_TRIALS)
    }
}

/// Generate numbers uniformly between `min` and `max`, both inclusive.
///
/// Integer types are sampled discretely, float types continuously.
pub fn choose<T>(min: T, max: T) -> Result<Gen<T>, GenError>
where
    T: SampleUniform + PartialOrd + Copy + fmt::Debug + 'static,
{
    match min.partial_cmp(&max) {
        Some(Ordering::Less) => Ok(Gen::new(move || random::range(min..=max))),
        Some(_) => Err(GenError::InvalidRange {
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }),
        None => {
            let bound = if min.partial_cmp(&min).is_none() {
                min
            } else {
                max
            };
            Err(GenError::NotNumeric {
                bound: format!("{bound:?}"),
            })
        }
    }
}

/// Pick a generator on every draw with probability proportional to its weight.
pub fn frequency<T: 'static>(weighted: Vec<(u32, Gen<T>)>) -> Result<Gen<T>, GenError> {
    let mut cumulative = Vec::with_capacity(weighted.len());
    let mut gens = Vec::with_capacity(weighted.len());
    let mut total: u64 = 0;

    for (weight, gen) in weighted {
        total += u64::from(weight);
        cumulative.push(total);
        gens.push(gen);
    }

    if total == 0 {
        return Err(GenError::Empty {
            combinator: "frequency",
        });
    }

    Ok(Gen::try_new(move || {
        let point = random::range(0..total);
        // First branch whose cumulative weight exceeds the point.
        let index = cumulative.partition_point(|&bound| bound <= point);
        gens[index].generate()
    }))
}

/// Pick one of `gens` uniformly on every draw.
pub fn one_of<T: 'static>(gens: Vec<Gen<T>>) -> Result<Gen<T>, GenError> {
    if gens.is_empty() {
        return Err(GenError::Empty {
            combinator: "one_of",
        });
    }

    Ok(Gen::try_new(move || {
        let index = random::range(0..gens.len());
        gens[index].generate()
    }))
}

/// Create a generator that always produces `value`.
pub fn constant<T: Clone + 'static>(value: T) -> Gen<T> {
    Gen::constant(value)
}

/// Apply `f` to every value `gen` produces.
pub fn map<T, U, F>(f: F, gen: Gen<T>) -> Gen<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + 'static,
{
    gen.map(f)
}
