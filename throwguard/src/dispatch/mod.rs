//! Result dispatchers
//!
//! A dispatcher runs the wrapped operation exactly once, after the last
//! handler has been registered, and routes the outcome to the catchers.

use crate::catcher::{CatcherList, Route};
use crate::config::GuardConfig;
use crate::error::{GuardError, Result};
use std::panic;
use throwguard_core::{Fault, Outcome};
use tracing::{debug, warn};

pub mod deferred;
pub mod immediate;
pub mod plain;

// Re-export dispatchers
pub use deferred::Deferred;
pub use immediate::Immediate;
pub use plain::Plain;

/// Dispatch mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Operation returns its result directly
    Immediate,
    /// Operation returns a bare value and fails only by panicking
    Plain,
    /// Operation returns a future
    Deferred,
}

/// Strategy for running an operation and settling its outcome
pub trait Dispatch<'h, A> {
    /// What the final registration hands back
    type Output;

    /// Run the operation with `args` and route the outcome through `catchers`
    fn dispatch(&self, args: A, catchers: CatcherList<'h>, config: &GuardConfig) -> Self::Output;

    /// Output carrying a registration-phase error
    fn fail(error: GuardError) -> Self::Output;

    /// Get the dispatch mode
    fn mode(&self) -> DispatchMode;
}

/// Turn an outcome into the final value
///
/// Success passes through as `Some`, a claimed fault becomes `None`. An
/// unclaimed panic is resumed with its original payload; any other
/// unclaimed fault is returned as [`GuardError::Unmatched`].
pub(crate) fn settle<T>(outcome: Outcome<T>, catchers: CatcherList<'_>) -> Result<Option<T>> {
    let fault = match outcome {
        Outcome::Success(value) => return Ok(Some(value)),
        Outcome::Failure(fault) => fault,
    };

    match catchers.route(fault) {
        Route::Handled { kind } => {
            debug!(kind, "fault claimed by handler");
            Ok(None)
        }
        Route::Unmatched(fault) => escalate(fault),
    }
}

fn escalate<T>(fault: Fault) -> Result<T> {
    warn!(fault = %fault, origin = ?fault.origin(), "fault matched no declared kind");

    // Only raised faults carry a payload to resume
    match fault.into_panic_payload() {
        Ok(payload) => panic::resume_unwind(payload),
        Err(fault) => Err(GuardError::Unmatched(fault)),
    }
}
