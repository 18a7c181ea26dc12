//! Configuration types for guarded invokers

use crate::error::{GuardError, Result};
use throwguard_core::naming::{is_valid_prefix, DEFAULT_PREFIX};

/// Guarded invoker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Run the operation under `catch_unwind` so panics reach the matcher
    ///
    /// Caught panics still pass through the process-wide panic hook, which
    /// by default prints a report to stderr even when a handler claims the
    /// fault. Install a quieter hook with [`std::panic::set_hook`] if that
    /// output is unwanted.
    pub capture_panics: bool,
    /// Prefix of registration method names
    pub method_prefix: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            capture_panics: true,
            method_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl GuardConfig {
    /// Panics propagate untouched; only returned errors are matched
    pub fn strict() -> Self {
        Self {
            capture_panics: false,
            ..Self::default()
        }
    }

    /// Panics and returned errors are both matched
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<()> {
        if !is_valid_prefix(&self.method_prefix) {
            return Err(GuardError::Config(format!(
                "method prefix '{}' is not an identifier",
                self.method_prefix
            )));
        }

        Ok(())
    }
}
