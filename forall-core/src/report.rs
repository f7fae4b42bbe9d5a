//! Text rendering of check results, assertions and grouped checks.

use crate::checker::{CheckResult, PropChecker};
use crate::error::CheckError;
use crate::property::Testable;
use std::fmt;

/// `"{number} {singular}"` when `number == 1`, `"{number} {plural}"` otherwise.
pub fn pluralize(singular: &str, plural: &str, number: usize) -> String {
    format!("{} {}", number, if number == 1 { singular } else { plural })
}

fn tests(number: usize) -> String {
    pluralize("test", "tests", number)
}

impl<V: fmt::Debug> fmt::Display for CheckResult<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Passed { tests: count } => write!(f, "OK, passed {}.", tests(*count)),
            CheckResult::Falsified {
                tests: count,
                inputs,
                shrinks,
            } => write!(
                f,
                "Falsified after {} ({}):\n> {:?}",
                tests(*count),
                pluralize("shrink", "shrinks", *shrinks),
                inputs
            ),
            CheckResult::Error {
                tests: count,
                inputs,
                error,
            } => {
                write!(f, "Falsified after {}:\n> ", tests(*count))?;
                match inputs {
                    Some(inputs) => write!(f, "{inputs:?}")?,
                    None => write!(f, "()")?,
                }
                write!(f, "\nwith exception:\n{error}")
            }
            CheckResult::FailedToGenerate {
                tests: count,
                attempts,
            } => write!(
                f,
                "Gave up after only {}. {} failed to be generated.",
                tests(*count),
                pluralize("argument", "arguments", *attempts)
            ),
            CheckResult::Troubled { message, backtrace } => {
                write!(f, "[forall] Some exception is raised:\n{message}\n{backtrace}")
            }
        }
    }
}

/// Print a result: passes go to stdout, everything else to stderr.
pub fn print_result<V: fmt::Debug>(result: &CheckResult<V>) {
    if result.is_passed() {
        println!("{result}");
    } else {
        eprintln!("{result}");
    }
}

/// Panic with the rendered result unless it passed.
///
/// # Panics
///
/// Panics when `result` is not [`CheckResult::Passed`].
pub fn assert_result<V: fmt::Debug>(result: &CheckResult<V>) {
    assert!(result.is_passed(), "{result}");
}

/// Check `prop` for `count` trials and print the outcome with [`print_result`].
pub fn check<P>(prop: &P, count: usize) -> Result<(), CheckError>
where
    P: Testable + ?Sized,
{
    check_with(prop, count, print_result)
}

/// Check `prop` for `count` trials and hand the outcome to `printer`.
pub fn check_with<P, F>(prop: &P, count: usize, printer: F) -> Result<(), CheckError>
where
    P: Testable + ?Sized,
    F: FnOnce(&CheckResult<P::Value>),
{
    let result = PropChecker::new(count)?.check(prop);
    printer(&result);
    Ok(())
}

/// Check `prop` for `count` trials and panic unless every trial passed.
///
/// # Panics
///
/// Panics with the rendered result when the check did not pass, or when
/// `count` is zero.
pub fn check_and_assert<P>(prop: &P, count: usize)
where
    P: Testable + ?Sized,
{
    check_and_assert_with(prop, count, assert_result)
}

/// Check `prop` for `count` trials and hand the outcome to `asserter`.
///
/// # Panics
///
/// Panics when `count` is zero.
pub fn check_and_assert_with<P, F>(prop: &P, count: usize, asserter: F)
where
    P: Testable + ?Sized,
    F: FnOnce(&CheckResult<P::Value>),
{
    let checker = match PropChecker::new(count) {
        Ok(checker) => checker,
        Err(error) => panic!("{error}"),
    };
    asserter(&checker.check(prop));
}

type ErasedCheck = Box<dyn Fn(&PropChecker) -> GroupResult>;

/// A named group of properties, checked together.
pub struct Properties {
    group_name: String,
    properties: Vec<(String, ErasedCheck)>,
}

impl Properties {
    pub fn new(group_name: impl Into<String>) -> Self {
        Properties {
            group_name: group_name.into(),
            properties: Vec::new(),
        }
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Add a property; properties are checked in insertion order.
    pub fn add<P>(&mut self, name: impl Into<String>, prop: P)
    where
        P: Testable + 'static,
    {
        let check: ErasedCheck = Box::new(move |checker: &PropChecker| {
            checker
                .check(&prop)
                .map_inputs(|inputs| Box::new(inputs) as Box<dyn fmt::Debug>)
        });
        self.properties.push((name.into(), check));
    }

    /// Names of the properties in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Properties")
            .field("group_name", &self.group_name)
            .field("properties", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Result of a grouped property.
pub type GroupResult = CheckResult<Box<dyn fmt::Debug>>;

/// Render one grouped result as `group.name -> text`.
pub fn group_line(result: &GroupResult, group_name: &str, name: &str) -> String {
    format!("{group_name}.{name} -> {result}")
}

/// Print one grouped result line, splitting stdout and stderr like [`print_result`].
pub fn print_result_in_group(result: &GroupResult, group_name: &str, name: &str) {
    let line = group_line(result, group_name, name);
    if result.is_passed() {
        println!("{line}");
    } else {
        eprintln!("{line}");
    }
}

/// Check every property of a group and print one `group.name -> result` line each.
///
/// Returns the printed lines.
pub fn check_all(properties: &Properties, count: usize) -> Result<Vec<String>, CheckError> {
    let mut lines = Vec::with_capacity(properties.len());
    check_all_with(properties, count, |result, group_name, name| {
        print_result_in_group(result, group_name, name);
        lines.push(group_line(result, group_name, name));
    })?;
    Ok(lines)
}

/// Check every property of a group in insertion order, handing each result
/// to `printer` together with the group and property names.
pub fn check_all_with<F>(
    properties: &Properties,
    count: usize,
    mut printer: F,
) -> Result<(), CheckError>
where
    F: FnMut(&GroupResult, &str, &str),
{
    let checker = PropChecker::new(count)?;
    for (name, check) in &properties.properties {
        printer(&check(&checker), properties.group_name.as_str(), name.as_str());
    }
    Ok(())
}
