//! Outcome classification
//!
//! Whatever an operation hands back is folded into a single [`Outcome`]
//! before any matching happens.

use crate::fault::{Fault, Origin};

/// Result of running an operation once
#[derive(Debug)]
pub enum Outcome<T> {
    /// Normal value
    Success(T),
    /// Error value, raised or returned
    Failure(Fault),
}

impl<T> Outcome<T> {
    /// Whether the operation produced a normal value
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Whether the operation failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Convert into a plain `Result`
    pub fn into_result(self) -> Result<T, Fault> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(fault) => Err(fault),
        }
    }

    /// Map the success value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }
}

/// Anything an operation may return
pub trait IntoOutcome {
    /// Success value type
    type Value;

    /// Classify the returned value
    fn into_outcome(self) -> Outcome<Self::Value>;
}

impl<T, E> IntoOutcome for Result<T, E>
where
    E: Into<Fault>,
{
    type Value = T;

    fn into_outcome(self) -> Outcome<T> {
        match self {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error.into().with_origin(Origin::Returned)),
        }
    }
}

impl<T> IntoOutcome for Outcome<T> {
    type Value = T;

    fn into_outcome(self) -> Outcome<T> {
        self
    }
}
