//! Guarded invokers with exhaustive error handling
//!
//! [`wrap`] binds a fallible operation to a fixed [`Declaration`] of error
//! kinds. Calling the resulting [`Guarded`] invoker does not run the
//! operation: it returns an [`Enforcer`] that insists on exactly one handler
//! per declared kind, registered in any order. The last registration runs
//! the operation once and routes its outcome:
//!
//! - a normal value is returned as `Some(value)`;
//! - an error matching a declared kind goes to that kind's handler and the
//!   result is `None`;
//! - an error matching nothing comes back as [`GuardError::Unmatched`], or is
//!   resumed unchanged if it was a panic.
//!
//! # Example
//!
//! ```rust
//! use throwguard::{wrap, Declaration, MatcherSpec};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("string was empty")]
//! struct StringEmptyError;
//!
//! fn string_length(text: &str) -> Result<usize, StringEmptyError> {
//!     let trimmed = text.trim();
//!     if trimmed.is_empty() {
//!         return Err(StringEmptyError);
//!     }
//!     Ok(trimmed.len())
//! }
//!
//! let declaration = Declaration::single(
//!     "StringEmptyError",
//!     MatcherSpec::type_tag::<StringEmptyError>(),
//! )?;
//! let guarded = wrap(string_length, declaration);
//!
//! let length = guarded
//!     .call("hello")
//!     .catch("catchStringEmptyError", |_| unreachable!())?
//!     .done()?;
//! assert_eq!(length, Some(5));
//!
//! let length = guarded
//!     .call("   ")
//!     .catch("StringEmptyError", |error| assert!(error.is::<StringEmptyError>()))?
//!     .done()?;
//! assert_eq!(length, None);
//! # Ok::<(), throwguard::GuardError>(())
//! ```

#![warn(missing_docs)]

pub mod catcher;
pub mod config;
pub mod dispatch;
pub mod enforcer;
pub mod error;
pub mod state;
pub mod wrapper;

// Re-export key types
pub use catcher::{Catcher, CatcherList, Handler};
pub use config::GuardConfig;
pub use dispatch::{Deferred, Dispatch, DispatchMode, Immediate, Plain};
pub use enforcer::{Enforcer, Step};
pub use error::{GuardError, Result};
pub use state::{EnforcerState, StateCache};
pub use wrapper::{wrap, wrap_async, wrap_plain, GuardBuilder, Guarded};

// Re-export from core for convenience
pub use throwguard_core::{
    declaration, handler_method_name, matches, Declaration, DeclarationBuilder, DeclarationError,
    ErrorKind, Fault, GenericError, IntoOutcome, MatcherKind, MatcherSpec, Origin, Outcome,
    TypeTag,
};
#[cfg(feature = "serde")]
pub use throwguard_core::ExportedKind;
