//! Operation wrapper
//!
//! [`wrap`], [`wrap_plain`] and [`wrap_async`] bind an operation to its
//! declared error kinds. The resulting [`Guarded`] invoker never runs the operation when called; it
//! hands out an [`Enforcer`] that does so once every kind has a handler.

use crate::{
    config::GuardConfig,
    dispatch::{Deferred, Dispatch, Immediate, Plain},
    enforcer::Enforcer,
    error::Result,
    state::{EnforcerState, StateCache},
};
use std::fmt;
use std::sync::Arc;
use throwguard_core::Declaration;
use tracing::trace;

pub(crate) struct Shared<D> {
    pub(crate) dispatcher: D,
    pub(crate) declaration: Arc<Declaration>,
    pub(crate) cache: StateCache,
    pub(crate) config: GuardConfig,
}

/// Guarded invoker for one operation
///
/// Cloning is cheap and shares the operation and its memoized state.
pub struct Guarded<D> {
    shared: Arc<Shared<D>>,
}

impl<D> Clone for Guarded<D> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<D> Guarded<D> {
    fn with_config(dispatcher: D, declaration: Declaration, config: GuardConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                dispatcher,
                declaration: Arc::new(declaration),
                cache: StateCache::new(),
                config,
            }),
        }
    }

    /// Start an invocation with `args`
    ///
    /// The operation does not run here. Every call gets its own empty set of
    /// handlers, so invocations never interfere with each other.
    pub fn call<'h, A>(&self, args: A) -> Enforcer<'h, D, A>
    where
        D: Dispatch<'h, A>,
    {
        let state = self.state();
        trace!(kinds = state.kind_count(), "guarded invoker called");
        Enforcer::new(Arc::clone(&self.shared), args)
    }

    /// Memoized registration table, built on first use
    pub fn state(&self) -> Arc<EnforcerState> {
        self.shared
            .cache
            .get_or_init(&self.shared.declaration, &self.shared.config.method_prefix)
    }

    /// Declared error kinds
    pub fn declaration(&self) -> &Declaration {
        &self.shared.declaration
    }

    /// Active configuration
    pub fn config(&self) -> &GuardConfig {
        &self.shared.config
    }

    /// Whether the invoker has been called at least once
    pub fn is_initialized(&self) -> bool {
        self.shared.cache.is_initialized()
    }
}

impl<D> fmt::Debug for Guarded<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guarded")
            .field("kinds", &self.shared.declaration.names().collect::<Vec<_>>())
            .field("config", &self.shared.config)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Guard an operation that returns its result directly
pub fn wrap<F>(op: F, declaration: Declaration) -> Guarded<Immediate<F>> {
    Guarded::with_config(Immediate::new(op), declaration, GuardConfig::default())
}

/// Guard an operation that returns a plain value and only fails by panicking
///
/// Panics are routed to the handlers as with [`wrap`]; under
/// [`GuardConfig::strict`] nothing is caught and the value is returned as is.
pub fn wrap_plain<F>(op: F, declaration: Declaration) -> Guarded<Plain<F>> {
    Guarded::with_config(Plain::new(op), declaration, GuardConfig::default())
}

/// Guard an operation that returns a future
pub fn wrap_async<F>(op: F, declaration: Declaration) -> Guarded<Deferred<F>> {
    Guarded::with_config(Deferred::new(op), declaration, GuardConfig::default())
}

/// Builder for guarded invokers with a custom configuration
#[derive(Debug)]
pub struct GuardBuilder {
    declaration: Declaration,
    config: GuardConfig,
}

impl GuardBuilder {
    /// Create a new builder
    pub fn new(declaration: Declaration) -> Self {
        Self {
            declaration,
            config: GuardConfig::default(),
        }
    }

    /// Set whether panics are routed to handlers
    pub fn capture_panics(mut self, capture: bool) -> Self {
        self.config.capture_panics = capture;
        self
    }

    /// Set the registration method prefix
    pub fn method_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.method_prefix = prefix.into();
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    /// Guard an operation that returns its result directly
    pub fn wrap<F>(self, op: F) -> Result<Guarded<Immediate<F>>> {
        self.finish(Immediate::new(op))
    }

    /// Guard an operation that returns a plain value and only fails by panicking
    pub fn wrap_plain<F>(self, op: F) -> Result<Guarded<Plain<F>>> {
        self.finish(Plain::new(op))
    }

    /// Guard an operation that returns a future
    pub fn wrap_async<F>(self, op: F) -> Result<Guarded<Deferred<F>>> {
        self.finish(Deferred::new(op))
    }

    fn finish<D>(self, dispatcher: D) -> Result<Guarded<D>> {
        self.config.validate()?;
        self.declaration.check_method_names(&self.config.method_prefix)?;
        Ok(Guarded::with_config(dispatcher, self.declaration, self.config))
    }
}
