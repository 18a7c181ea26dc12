//! Per-operation enforcer state
//!
//! The lookup table behind registration (kind names, method names, their
//! positions) depends only on the declaration, so it is built on the first
//! call of a guarded invoker and shared by every later call.

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use throwguard_core::{handler_method_name, Declaration};
use tracing::debug;

/// Memoized registration table for one wrapped operation
#[derive(Debug)]
pub struct EnforcerState {
    declaration: Arc<Declaration>,
    method_names: Vec<String>,
    index: HashMap<String, usize>,
}

impl EnforcerState {
    pub(crate) fn build(declaration: Arc<Declaration>, prefix: &str) -> Self {
        let method_names: Vec<String> = declaration
            .names()
            .map(|name| handler_method_name(prefix, name))
            .collect();

        let mut index = HashMap::with_capacity(declaration.len() * 2);
        for (position, name) in declaration.names().enumerate() {
            index.entry(name.to_string()).or_insert(position);
        }
        for (position, method) in method_names.iter().enumerate() {
            index.entry(method.clone()).or_insert(position);
        }

        Self {
            declaration,
            method_names,
            index,
        }
    }

    /// Declared kinds
    pub fn declaration(&self) -> &Arc<Declaration> {
        &self.declaration
    }

    /// Number of declared kinds
    pub fn kind_count(&self) -> usize {
        self.declaration.len()
    }

    /// Registration method names in declaration order
    pub fn method_names(&self) -> &[String] {
        &self.method_names
    }

    /// Position of a kind, looked up by kind name or method name
    pub fn resolve(&self, kind: &str) -> Option<usize> {
        self.index.get(kind).copied()
    }
}

/// Lazily created [`EnforcerState`] owned by a guarded invoker
#[derive(Debug, Default)]
pub struct StateCache {
    cell: OnceCell<Arc<EnforcerState>>,
}

impl StateCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// State for this operation, built on first use
    pub fn get_or_init(&self, declaration: &Arc<Declaration>, prefix: &str) -> Arc<EnforcerState> {
        let state = self.cell.get_or_init(|| {
            debug!(kinds = declaration.len(), prefix, "memoizing enforcer state");
            Arc::new(EnforcerState::build(Arc::clone(declaration), prefix))
        });
        Arc::clone(state)
    }

    /// State if already built
    pub fn get(&self) -> Option<&Arc<EnforcerState>> {
        self.cell.get()
    }

    /// Whether the state was built
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
