//! Layered error types
//!
//! Programmer errors (duplicate or unknown registrations, a detached state,
//! misuse of a finished enforcer) are surfaced immediately. Faults no handler
//! claimed come back as [`GuardError::Unmatched`] with the original value.

use thiserror::Error;
use throwguard_core::{DeclarationError, Fault};

/// Engine-level errors
#[derive(Error, Debug)]
pub enum GuardError {
    /// Declaration could not be built
    #[error("declaration error: {0}")]
    Declaration(#[from] DeclarationError),

    /// Kind already has a handler in this invocation
    #[error("a handler for error kind '{kind}' is already registered")]
    DuplicateHandler {
        /// The kind registered twice
        kind: String,
    },

    /// Kind is not part of the declaration
    #[error("error kind '{kind}' is not declared for this operation")]
    UnknownKind {
        /// The requested kind or method name
        kind: String,
    },

    /// Enforcer lost track of its operation's memoized state
    #[error("guarded invoker is detached from its enforcer state")]
    DetachedState,

    /// Error matched none of the declared kinds
    #[error("unhandled error: {0}")]
    Unmatched(Fault),

    /// Result requested before every kind had a handler
    #[error("{remaining} error kind(s) still need a handler")]
    Incomplete {
        /// Kinds without a handler
        remaining: usize,
    },

    /// Handler registered after the operation already ran
    #[error("every error kind already has a handler")]
    AlreadyComplete,

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GuardError {
    /// Whether this carries an unclaimed fault
    pub fn is_unmatched(&self) -> bool {
        matches!(self, GuardError::Unmatched(_))
    }

    /// Whether this reports misuse of the guarded invoker itself
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            GuardError::DuplicateHandler { .. }
                | GuardError::UnknownKind { .. }
                | GuardError::DetachedState
                | GuardError::Incomplete { .. }
                | GuardError::AlreadyComplete
        )
    }

    /// Take back the unclaimed fault
    pub fn into_fault(self) -> Option<Fault> {
        match self {
            GuardError::Unmatched(fault) => Some(fault),
            _ => None,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, GuardError>;
