//! Registered handlers for one invocation

use crate::error::{GuardError, Result};
use std::sync::Arc;
use throwguard_core::{Declaration, Fault};

/// Callback receiving a matched fault
pub type Handler<'h> = Box<dyn FnOnce(Fault) + Send + 'h>;

/// A handler bound to one declared kind
pub struct Catcher<'h> {
    kind: usize,
    handler: Handler<'h>,
}

impl Catcher<'_> {
    /// Position of the kind in the declaration
    pub fn kind_index(&self) -> usize {
        self.kind
    }
}

/// Where a fault ended up
#[derive(Debug)]
pub(crate) enum Route {
    /// A handler claimed it
    Handled {
        /// Position of the claiming kind
        kind: usize,
    },
    /// Nobody claimed it
    Unmatched(Fault),
}

/// Handlers registered during one invocation, in registration order
pub struct CatcherList<'h> {
    declaration: Arc<Declaration>,
    catchers: Vec<Catcher<'h>>,
}

impl<'h> CatcherList<'h> {
    pub(crate) fn new(declaration: Arc<Declaration>) -> Self {
        let catchers = Vec::with_capacity(declaration.len());
        Self {
            declaration,
            catchers,
        }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.catchers.len()
    }

    /// Whether no handler is registered yet
    pub fn is_empty(&self) -> bool {
        self.catchers.is_empty()
    }

    /// Kinds still lacking a handler
    pub fn remaining(&self) -> usize {
        self.declaration.len() - self.catchers.len()
    }

    /// Whether every declared kind has a handler
    pub fn is_exhaustive(&self) -> bool {
        self.catchers.len() == self.declaration.len()
    }

    /// Whether the kind at `index` has a handler
    pub fn contains(&self, index: usize) -> bool {
        self.catchers.iter().any(|catcher| catcher.kind == index)
    }

    /// Registered kind names in registration order
    pub fn kinds(&self) -> Vec<&str> {
        self.catchers
            .iter()
            .filter_map(|catcher| self.declaration.kind_at(catcher.kind))
            .map(|kind| kind.name())
            .collect()
    }

    pub(crate) fn push(&mut self, index: usize, handler: Handler<'h>) -> Result<()> {
        let kind = self
            .declaration
            .kind_at(index)
            .ok_or(GuardError::DetachedState)?;

        if self.contains(index) {
            return Err(GuardError::DuplicateHandler {
                kind: kind.name().to_string(),
            });
        }

        self.catchers.push(Catcher {
            kind: index,
            handler,
        });
        Ok(())
    }

    /// Hand the fault to the first catcher, in registration order, whose kind matches
    pub(crate) fn route(self, fault: Fault) -> Route {
        let CatcherList {
            declaration,
            catchers,
        } = self;

        let claimed = catchers.into_iter().find(|catcher| {
            declaration
                .kind_at(catcher.kind)
                .is_some_and(|kind| kind.spec().matches(&fault))
        });

        match claimed {
            Some(catcher) => {
                (catcher.handler)(fault);
                Route::Handled { kind: catcher.kind }
            }
            None => Route::Unmatched(fault),
        }
    }
}
