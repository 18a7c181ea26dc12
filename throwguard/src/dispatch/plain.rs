//! Dispatch for operations that return a bare value
//!
//! Such an operation has no error channel of its own; a panic is its only
//! way to fail, so there is nothing to classify on the success path.

use crate::{
    catcher::CatcherList,
    config::GuardConfig,
    dispatch::{settle, Dispatch, DispatchMode},
    error::{GuardError, Result},
};
use std::panic::{self, AssertUnwindSafe};
use throwguard_core::{Fault, Outcome};
use tracing::debug;

/// Dispatcher for operations returning a plain value
#[derive(Debug, Clone)]
pub struct Plain<F> {
    op: F,
}

impl<F> Plain<F> {
    /// Wrap an operation
    pub fn new(op: F) -> Self {
        Self { op }
    }
}

impl<'h, F, A, T> Dispatch<'h, A> for Plain<F>
where
    F: Fn(A) -> T,
{
    type Output = Result<Option<T>>;

    fn dispatch(&self, args: A, catchers: CatcherList<'h>, config: &GuardConfig) -> Self::Output {
        debug!(handlers = catchers.len(), "dispatching plain operation");

        if !config.capture_panics {
            return Ok(Some((self.op)(args)));
        }

        let outcome = match panic::catch_unwind(AssertUnwindSafe(move || (self.op)(args))) {
            Ok(value) => Outcome::Success(value),
            Err(payload) => Outcome::Failure(Fault::from_panic(payload)),
        };

        settle(outcome, catchers)
    }

    fn fail(error: GuardError) -> Self::Output {
        Err(error)
    }

    fn mode(&self) -> DispatchMode {
        DispatchMode::Plain
    }
}
