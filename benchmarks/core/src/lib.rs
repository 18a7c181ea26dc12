//! Benchmark fixtures for throwguard
//!
//! Compares three ways of failing with one of five error kinds: panicking
//! and catching the unwind, returning a `Result`, and routing through a
//! guarded invoker with one handler per kind.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use throwguard::{wrap, Declaration, Fault, Guarded, Immediate, MatcherSpec, Step};

pub mod constants;

use constants::{KIND_COUNT, SUCCESS_EVERY};

macro_rules! bench_errors {
    ($($name:ident => $message:literal),+ $(,)?) => {
        $(
            #[derive(Debug, thiserror::Error)]
            #[error($message)]
            pub struct $name;
        )+
    };
}

bench_errors! {
    FirstError => "first failure",
    SecondError => "second failure",
    ThirdError => "third failure",
    FourthError => "fourth failure",
    FifthError => "fifth failure",
}

/// Kind names in declaration order
pub const KIND_NAMES: [&str; KIND_COUNT] = [
    "FirstError",
    "SecondError",
    "ThirdError",
    "FourthError",
    "FifthError",
];

/// Result of a benchmark operation: `Ok(input)` or one of the five errors
pub fn returner(input: usize) -> Result<usize, Fault> {
    match input % SUCCESS_EVERY {
        0 => Err(FirstError.into()),
        1 => Err(SecondError.into()),
        2 => Err(ThirdError.into()),
        3 => Err(FourthError.into()),
        4 => Err(FifthError.into()),
        _ => Ok(input),
    }
}

/// Same as [`returner`], but failures unwind
pub fn thrower(input: usize) -> usize {
    match returner(input) {
        Ok(value) => value,
        Err(fault) => panic::panic_any(fault.to_string()),
    }
}

/// Install a panic hook that prints nothing
///
/// Unwinding is the measured path for [`thrower`]; the default hook would
/// write a report to stderr on every iteration.
pub fn silence_panics() {
    panic::set_hook(Box::new(|_| {}));
}

/// Run [`thrower`] and catch its unwind, counting failures
pub fn catch_thrower(input: usize, failures: &AtomicUsize) -> Option<usize> {
    match panic::catch_unwind(AssertUnwindSafe(|| thrower(input))) {
        Ok(value) => Some(value),
        Err(_) => {
            failures.fetch_add(1, Ordering::Relaxed);
            None
        }
    }
}

/// Run [`returner`] and match on its result, counting failures
pub fn match_returner(input: usize, failures: &AtomicUsize) -> Option<usize> {
    match returner(input) {
        Ok(value) => Some(value),
        Err(_) => {
            failures.fetch_add(1, Ordering::Relaxed);
            None
        }
    }
}

/// Declaration of the five benchmark kinds
pub fn create_declaration() -> Declaration {
    Declaration::builder()
        .kind(KIND_NAMES[0], MatcherSpec::type_tag::<FirstError>())
        .kind(KIND_NAMES[1], MatcherSpec::type_tag::<SecondError>())
        .kind(KIND_NAMES[2], MatcherSpec::type_tag::<ThirdError>())
        .kind(KIND_NAMES[3], MatcherSpec::type_tag::<FourthError>())
        .kind(KIND_NAMES[4], MatcherSpec::type_tag::<FifthError>())
        .build()
        .expect("benchmark declaration is valid")
}

/// Guarded [`returner`]
pub type GuardedReturner = Guarded<Immediate<fn(usize) -> Result<usize, Fault>>>;

/// Create the guarded form of [`returner`]
pub fn create_guarded() -> GuardedReturner {
    wrap(returner as fn(usize) -> Result<usize, Fault>, create_declaration())
}

/// Invoke the guarded operation with one counting handler per kind
pub fn call_guarded(
    guarded: &GuardedReturner,
    input: usize,
    failures: &AtomicUsize,
) -> Option<usize> {
    let count = |_: Fault| {
        failures.fetch_add(1, Ordering::Relaxed);
    };

    let mut enforcer = guarded.call(input);
    for name in KIND_NAMES {
        match enforcer.catch(name, count).expect("every kind is declared once") {
            Step::Pending(next) => enforcer = next,
            Step::Done(result) => {
                return result.expect("every failure has a handler");
            }
        }
    }

    unreachable!("the last kind completes registration")
}
