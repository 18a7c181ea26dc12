//! Asynchronous dispatch
//!
//! The operation is called synchronously to obtain its future; a panic at
//! that point settles right away, exactly like the immediate case. The
//! future itself is awaited inside the returned [`BoxFuture`], where a
//! rejection (an `Err` output) or a panic while polling is routed the same
//! way a synchronous failure would be.

use crate::{
    catcher::CatcherList,
    config::GuardConfig,
    dispatch::{settle, Dispatch, DispatchMode},
    error::{GuardError, Result},
};
use futures::future::{self, BoxFuture, FutureExt};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use throwguard_core::{Fault, IntoOutcome, Outcome};
use tracing::debug;

/// Dispatcher for operations that return a future
#[derive(Debug, Clone)]
pub struct Deferred<F> {
    op: F,
}

impl<F> Deferred<F> {
    /// Wrap an operation
    pub fn new(op: F) -> Self {
        Self { op }
    }
}

impl<'h, F, A, Fut> Dispatch<'h, A> for Deferred<F>
where
    F: Fn(A) -> Fut,
    Fut: Future + Send + 'h,
    Fut::Output: IntoOutcome,
    <Fut::Output as IntoOutcome>::Value: Send + 'h,
{
    type Output = BoxFuture<'h, Result<Option<<Fut::Output as IntoOutcome>::Value>>>;

    fn dispatch(&self, args: A, catchers: CatcherList<'h>, config: &GuardConfig) -> Self::Output {
        debug!(handlers = catchers.len(), "dispatching deferred operation");

        let capture = config.capture_panics;
        let pending = if capture {
            panic::catch_unwind(AssertUnwindSafe(move || (self.op)(args)))
        } else {
            Ok((self.op)(args))
        };

        let pending = match pending {
            Ok(pending) => pending,
            Err(payload) => {
                let settled = settle(Outcome::Failure(Fault::from_panic(payload)), catchers);
                return future::ready(settled).boxed();
            }
        };

        async move {
            let outcome = if capture {
                match AssertUnwindSafe(pending).catch_unwind().await {
                    Ok(output) => output.into_outcome(),
                    Err(payload) => Outcome::Failure(Fault::from_panic(payload)),
                }
            } else {
                pending.await.into_outcome()
            };

            settle(outcome, catchers)
        }
        .boxed()
    }

    fn fail(error: GuardError) -> Self::Output {
        future::ready(Err(error)).boxed()
    }

    fn mode(&self) -> DispatchMode {
        DispatchMode::Deferred
    }
}
