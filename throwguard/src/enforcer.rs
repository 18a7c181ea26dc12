//! Handler registration
//!
//! An [`Enforcer`] collects one handler per declared kind, in any order. The
//! registration that completes the set runs the operation; every earlier one
//! hands the same enforcer back as [`Step::Pending`].

use crate::{
    catcher::CatcherList,
    dispatch::Dispatch,
    error::{GuardError, Result},
    wrapper::Shared,
};
use std::fmt;
use std::sync::Arc;
use throwguard_core::Fault;
use tracing::trace;

/// One invocation of a guarded operation, waiting for its handlers
pub struct Enforcer<'h, D, A> {
    shared: Arc<Shared<D>>,
    args: A,
    catchers: CatcherList<'h>,
}

/// What a registration produced
pub enum Step<'h, D, A>
where
    D: Dispatch<'h, A>,
{
    /// More kinds need a handler
    Pending(Enforcer<'h, D, A>),
    /// The operation ran; this is its final result
    Done(D::Output),
}

impl<'h, D, A> Enforcer<'h, D, A>
where
    D: Dispatch<'h, A>,
{
    pub(crate) fn new(shared: Arc<Shared<D>>, args: A) -> Self {
        let catchers = CatcherList::new(Arc::clone(&shared.declaration));
        Self {
            shared,
            args,
            catchers,
        }
    }

    /// Register the handler for `kind`
    ///
    /// `kind` is either the declared kind name (`StringEmptyError`) or its
    /// registration method name (`catchStringEmptyError`).
    pub fn catch<H>(mut self, kind: &str, handler: H) -> Result<Step<'h, D, A>>
    where
        H: FnOnce(Fault) + Send + 'h,
    {
        let (index, total) = {
            let state = self.shared.cache.get().ok_or(GuardError::DetachedState)?;
            let index = state.resolve(kind).ok_or_else(|| GuardError::UnknownKind {
                kind: kind.to_string(),
            })?;
            (index, state.kind_count())
        };

        self.catchers.push(index, Box::new(handler))?;
        trace!(kind, registered = self.catchers.len(), total, "handler registered");

        if self.catchers.len() < total {
            return Ok(Step::Pending(self));
        }

        let Enforcer {
            shared,
            args,
            catchers,
        } = self;
        Ok(Step::Done(
            shared.dispatcher.dispatch(args, catchers, &shared.config),
        ))
    }

    /// Kinds still lacking a handler
    pub fn remaining(&self) -> usize {
        self.catchers.remaining()
    }

    /// Kinds with a handler, in registration order
    pub fn registered(&self) -> Vec<&str> {
        self.catchers.kinds()
    }

    /// Kinds without a handler, in declaration order
    pub fn unhandled(&self) -> Vec<&str> {
        self.shared
            .declaration
            .names()
            .enumerate()
            .filter(|(index, _)| !self.catchers.contains(*index))
            .map(|(_, name)| name)
            .collect()
    }

    /// Registration method names for every declared kind
    pub fn method_names(&self) -> &[String] {
        self.shared
            .cache
            .get()
            .map(|state| state.method_names())
            .unwrap_or_default()
    }

    /// Whether every kind has a handler
    pub fn is_exhaustive(&self) -> bool {
        self.catchers.is_exhaustive()
    }
}

impl<D, A> fmt::Debug for Enforcer<'_, D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enforcer")
            .field("registered", &self.catchers.kinds())
            .field("remaining", &self.catchers.remaining())
            .finish_non_exhaustive()
    }
}

impl<'h, D, A> Step<'h, D, A>
where
    D: Dispatch<'h, A>,
{
    /// Register the next handler on a pending step
    pub fn catch<H>(self, kind: &str, handler: H) -> Result<Self>
    where
        H: FnOnce(Fault) + Send + 'h,
    {
        match self {
            Step::Pending(enforcer) => enforcer.catch(kind, handler),
            Step::Done(_) => Err(GuardError::AlreadyComplete),
        }
    }

    /// Final result, or [`GuardError::Incomplete`] through the dispatcher's output
    pub fn done(self) -> D::Output {
        match self {
            Step::Pending(enforcer) => D::fail(GuardError::Incomplete {
                remaining: enforcer.remaining(),
            }),
            Step::Done(output) => output,
        }
    }

    /// Whether the operation already ran
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    /// The pending enforcer, if any
    pub fn into_enforcer(self) -> Option<Enforcer<'h, D, A>> {
        match self {
            Step::Pending(enforcer) => Some(enforcer),
            Step::Done(_) => None,
        }
    }
}

impl<'h, D, A> fmt::Debug for Step<'h, D, A>
where
    D: Dispatch<'h, A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Pending(enforcer) => f.debug_tuple("Pending").field(enforcer).finish(),
            Step::Done(_) => f.write_str("Done(..)"),
        }
    }
}
