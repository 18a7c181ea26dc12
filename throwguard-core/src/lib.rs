//! Fault values, matchers and error kind declarations
//!
//! This crate holds the deterministic leaf layer of throwguard: how an error
//! value is represented ([`Fault`]), how an operation's return is classified
//! ([`Outcome`]), how a value is matched against a declared kind
//! ([`MatcherSpec`]), and the declaration of kinds itself ([`Declaration`]).
//! The enforcement engine lives in the `throwguard` crate.

#![warn(missing_docs)]

pub mod declaration;
pub mod error;
#[cfg(feature = "serde")]
pub mod export;
pub mod fault;
pub mod matcher;
pub mod naming;
pub mod outcome;

// Re-export key types
pub use declaration::{Declaration, DeclarationBuilder, ErrorKind};
pub use error::{DeclarationError, Result};
#[cfg(feature = "serde")]
pub use export::ExportedKind;
pub use fault::{Fault, GenericError, Origin};
pub use matcher::{matches, MatcherKind, MatcherSpec, TypeTag};
pub use naming::{handler_method_name, DEFAULT_PREFIX};
pub use outcome::{IntoOutcome, Outcome};
