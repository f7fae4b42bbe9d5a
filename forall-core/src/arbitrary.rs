//! Arbitraries: a generator paired with a shrinker for one type.

use crate::error::GenError;
use crate::gen::Gen;
use crate::random;
use crate::shrink::{
    nothing, CharShrinker, DateShrinker, FloatShrinker, IntShrinker, ListShrinker, Shrinker,
    Shrinks, StrShrinker,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::iter;

/// Default maximum length of [`arb_list`].
pub const DEFAULT_LIST_LENGTH: usize = 100;

/// Default maximum length of [`arb_str`].
pub const DEFAULT_STR_LENGTH: usize = 20;

/// Something that can produce random values and shrink counterexamples.
pub trait Arbitrary {
    type Value: Clone + fmt::Debug + PartialEq + 'static;

    /// Produce one random value.
    fn arbitrary(&self) -> Result<Self::Value, GenError>;

    /// Smaller candidates for a failing value, most aggressive first.
    fn shrink(&self, value: &Self::Value) -> Shrinks<Self::Value>;
}

/// A shrinker that never offers candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShrink;

impl<T: 'static> Shrinker<T> for NoShrink {
    fn shrink(&self, _value: &T) -> Shrinks<T> {
        nothing()
    }
}

/// An arbitrary built from a generator and a shrinker.
pub struct Arb<T, S> {
    gen: Gen<T>,
    shrinker: S,
}

impl<T: 'static, S> Arb<T, S> {
    pub fn new(gen: Gen<T>, shrinker: S) -> Self {
        Arb { gen, shrinker }
    }
}

impl<T, S> Arbitrary for Arb<T, S>
where
    T: Clone + fmt::Debug + PartialEq + 'static,
    S: Shrinker<T>,
{
    type Value = T;

    fn arbitrary(&self) -> Result<T, GenError> {
        self.gen.generate()
    }

    fn shrink(&self, value: &T) -> Shrinks<T> {
        self.shrinker.shrink(value)
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Arb<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arb")
            .field("gen", &self.gen)
            .field("shrinker", &self.shrinker)
            .finish()
    }
}

pub type ArbInt = Arb<i64, IntShrinker>;
pub type ArbFloat = Arb<f64, FloatShrinker>;
pub type ArbChar = Arb<char, CharShrinker>;
pub type ArbDate = Arb<NaiveDateTime, DateShrinker>;
pub type ArbList<T> = Arb<Vec<T>, ListShrinker>;
pub type ArbStr = Arb<String, StrShrinker>;

/// Integers drawn uniformly from the whole `i64` range.
pub fn arb_int() -> ArbInt {
    Arb::new(Gen::new(|| random::range(i64::MIN..=i64::MAX)), IntShrinker)
}

/// Floats assembled from random sign, exponent and fraction bits.
///
/// Every bit pattern is reachable, so subnormals, infinities and NaN all turn up.
pub fn arb_float() -> ArbFloat {
    let gen = Gen::new(|| {
        let sign: u64 = random::range(0..=1);
        let exponent: u64 = random::range(0..=0x7ff);
        let fraction: u64 = random::range(0..=0x000f_ffff_ffff_ffff);
        f64::from_bits((sign << 63) | (exponent << 52) | fraction)
    });
    Arb::new(gen, FloatShrinker)
}

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_END: u32 = 0xDFFF;
const BMP_END: u32 = 0xFFFF;

/// Characters of the basic multilingual plane outside the surrogate band.
///
/// The two sub-ranges are weighted by their size.
pub fn arb_char() -> ArbChar {
    let below = SURROGATE_START;
    let above = BMP_END - SURROGATE_END;
    let gen = Gen::try_new(move || {
        let code = if random::range(0..below + above) < below {
            random::range(0..SURROGATE_START)
        } else {
            random::range(SURROGATE_END + 1..=BMP_END)
        };
        char::from_u32(code).ok_or_else(|| GenError::Invalid {
            reason: format!("{code:#x} is not a unicode scalar value"),
        })
    });
    Arb::new(gen, CharShrinker)
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Timestamps with a year in `1..=9999` and whole seconds.
pub fn arb_date() -> ArbDate {
    let gen = Gen::try_new(|| {
        let year = random::range(1..=9999);
        let month = random::range(1..=12);
        let day = random::range(1..=days_in_month(year, month));
        let hour = random::range(0..=23);
        let minute = random::range(0..=59);
        let second = random::range(0..=59);

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| GenError::Invalid {
                reason: format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} is not a valid timestamp"
                ),
            })
    });
    Arb::new(gen, DateShrinker)
}

/// Lists of up to `max_length` elements drawn from `element`.
pub fn arb_list<A>(element: A, max_length: usize) -> ArbList<A::Value>
where
    A: Arbitrary + 'static,
{
    let gen = Gen::try_new(move || {
        let length = random::range(0..=max_length);
        (0..length).map(|_| element.arbitrary()).collect()
    });
    Arb::new(gen, ListShrinker)
}

/// Strings of up to `max_length` characters drawn from [`arb_char`].
pub fn arb_str(max_length: usize) -> ArbStr {
    let chars = arb_char();
    let gen = Gen::try_new(move || {
        let length = random::range(0..=max_length);
        (0..length).map(|_| chars.arbitrary()).collect()
    });
    Arb::new(gen, StrShrinker)
}

/// An arbitrary over a custom generator that never shrinks.
pub fn from_gen<T>(gen: Gen<T>) -> Arb<T, NoShrink>
where
    T: Clone + fmt::Debug + PartialEq + 'static,
{
    Arb::new(gen, NoShrink)
}

/// An arbitrary over a custom generator and shrinker.
pub fn from_gen_shrink<T, S>(gen: Gen<T>, shrinker: S) -> Arb<T, S>
where
    T: Clone + fmt::Debug + PartialEq + 'static,
    S: Shrinker<T>,
{
    Arb::new(gen, shrinker)
}

// A tuple of arbitraries is the positional argument list of a property.
// Components are generated left to right and shrunk in lockstep; the
// candidate sequence ends with the shortest component sequence.
macro_rules! impl_arbitrary_for_tuple {
    ($($name:ident $index:tt),+) => {
        impl<$($name: Arbitrary),+> Arbitrary for ($($name,)+) {
            type Value = ($($name::Value,)+);

            fn arbitrary(&self) -> Result<Self::Value, GenError> {
                Ok(($(self.$index.arbitrary()?,)+))
            }

            fn shrink(&self, value: &Self::Value) -> Shrinks<Self::Value> {
                let mut candidates = ($(self.$index.shrink(&value.$index),)+);
                Box::new(iter::from_fn(move || Some(($(candidates.$index.next()?,)+))))
            }
        }
    };
}

impl_arbitrary_for_tuple!(A 0);
impl_arbitrary_for_tuple!(A 0, B 1);
impl_arbitrary_for_tuple!(A 0, B 1, C 2);
impl_arbitrary_for_tuple!(A 0, B 1, C 2, D 3);
impl_arbitrary_for_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_arbitrary_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
