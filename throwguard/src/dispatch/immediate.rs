//! Synchronous dispatch

use crate::{
    catcher::CatcherList,
    config::GuardConfig,
    dispatch::{settle, Dispatch, DispatchMode},
    error::{GuardError, Result},
};
use std::panic::{self, AssertUnwindSafe};
use throwguard_core::{Fault, IntoOutcome, Outcome};
use tracing::debug;

/// Dispatcher for operations that return their result directly
#[derive(Debug, Clone)]
pub struct Immediate<F> {
    op: F,
}

impl<F> Immediate<F> {
    /// Wrap an operation
    pub fn new(op: F) -> Self {
        Self { op }
    }
}

impl<'h, F, A, R> Dispatch<'h, A> for Immediate<F>
where
    F: Fn(A) -> R,
    R: IntoOutcome,
{
    type Output = Result<Option<R::Value>>;

    fn dispatch(&self, args: A, catchers: CatcherList<'h>, config: &GuardConfig) -> Self::Output {
        debug!(handlers = catchers.len(), "dispatching operation");

        let outcome = if config.capture_panics {
            match panic::catch_unwind(AssertUnwindSafe(move || (self.op)(args))) {
                Ok(returned) => returned.into_outcome(),
                Err(payload) => Outcome::Failure(Fault::from_panic(payload)),
            }
        } else {
            (self.op)(args).into_outcome()
        };

        settle(outcome, catchers)
    }

    fn fail(error: GuardError) -> Self::Output {
        Err(error)
    }

    fn mode(&self) -> DispatchMode {
        DispatchMode::Immediate
    }
}
