//! Runtime error values
//!
//! A [`Fault`] is the owned form of anything an operation raised or returned
//! as an error: a typed `std::error::Error`, a bare string, an arbitrary value,
//! or a caught panic payload. Matchers only ever look at a `Fault`.

use std::any::{type_name, Any, TypeId};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// How a failure reached the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Raised while the operation ran (a panic)
    Raised,
    /// Handed back as an error value
    Returned,
}

/// Untyped error carrying only a name and a message
///
/// Use it where an operation fails with "some error" rather than a dedicated
/// type; literal and pattern matchers still see both fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GenericError {
    name: String,
    message: String,
}

impl GenericError {
    /// Name reported by [`GenericError::new`]
    pub const DEFAULT_NAME: &'static str = "Error";

    /// Create an error named `Error`
    pub fn new(message: impl Into<String>) -> Self {
        Self::named(Self::DEFAULT_NAME, message)
    }

    /// Create an error with an explicit name
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Error name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

trait ErrorValue: StdError + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
    fn as_error(&self) -> &(dyn StdError + 'static);
}

impl<E: StdError + Send + Sync + 'static> ErrorValue for E {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }

    fn as_error(&self) -> &(dyn StdError + 'static) {
        self
    }
}

enum Repr {
    Error(Box<dyn ErrorValue>),
    Payload(Box<dyn Any + Send>),
}

/// An error value on its way to a handler
pub struct Fault {
    repr: Repr,
    name: Option<String>,
    type_id: TypeId,
    type_name: &'static str,
    origin: Origin,
}

impl Fault {
    /// Wrap a typed error
    ///
    /// The fault's name is the short type name of `E` (`EmptyError` for
    /// `my_crate::errors::EmptyError`), or the explicit name of a
    /// [`GenericError`].
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let name = match (&error as &dyn Any).downcast_ref::<GenericError>() {
            Some(generic) => generic.name().to_string(),
            None => short_type_name(type_name::<E>()).to_string(),
        };

        Self {
            repr: Repr::Error(Box::new(error)),
            name: Some(name),
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            origin: Origin::Returned,
        }
    }

    /// Wrap a bare string
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::value(text.into())
    }

    /// Wrap any other value
    ///
    /// Values that are neither errors nor strings can only be matched by type.
    pub fn value<V: Any + Send>(value: V) -> Self {
        Self {
            repr: Repr::Payload(Box::new(value)),
            name: None,
            type_id: TypeId::of::<V>(),
            type_name: type_name::<V>(),
            origin: Origin::Returned,
        }
    }

    /// Wrap a payload caught from a panic
    ///
    /// `&'static str` and `String` payloads (what `panic!` produces) keep
    /// their text. Any other payload, including a typed error raised with
    /// `std::panic::panic_any`, is opaque here: its type cannot be
    /// recovered from `dyn Any`, so it has no name or message and only a
    /// type-tag matcher will claim it.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let type_id = (*payload).type_id();
        let type_name = if payload.is::<&'static str>() {
            type_name::<&'static str>()
        } else if payload.is::<String>() {
            type_name::<String>()
        } else {
            "panic payload"
        };

        Self {
            repr: Repr::Payload(payload),
            name: None,
            type_id,
            type_name,
            origin: Origin::Raised,
        }
    }

    /// Replace the recorded origin
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// How this fault reached the dispatcher
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Error name, if the fault wraps an error
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Error message, if the fault wraps an error
    pub fn message(&self) -> Option<String> {
        match &self.repr {
            Repr::Error(error) => Some(error.to_string()),
            Repr::Payload(_) => None,
        }
    }

    /// The string itself, if the fault wraps a string
    pub fn as_text(&self) -> Option<&str> {
        match &self.repr {
            Repr::Error(_) => None,
            Repr::Payload(payload) => payload
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| payload.downcast_ref::<&'static str>().copied()),
        }
    }

    /// The wrapped error, if any
    pub fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.repr {
            Repr::Error(error) => Some((**error).as_error()),
            Repr::Payload(_) => None,
        }
    }

    /// `TypeId` of the wrapped value
    pub fn value_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether the wrapped value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrow the wrapped value as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match &self.repr {
            Repr::Error(error) => (**error).as_any().downcast_ref::<T>(),
            Repr::Payload(payload) => payload.downcast_ref::<T>(),
        }
    }

    /// Take the wrapped value as a `T`, handing the fault back on mismatch
    pub fn downcast<T: Any>(self) -> Result<T, Fault> {
        if !self.is::<T>() {
            return Err(self);
        }

        let Fault {
            repr,
            name,
            type_id,
            type_name,
            origin,
        } = self;
        let boxed = match repr {
            Repr::Error(error) => error.into_any(),
            Repr::Payload(payload) => payload,
        };

        boxed.downcast::<T>().map(|value| *value).map_err(|payload| Fault {
            repr: Repr::Payload(payload),
            name,
            type_id,
            type_name,
            origin,
        })
    }

    /// Recover the original panic payload so it can be resumed unchanged
    pub fn into_panic_payload(self) -> Result<Box<dyn Any + Send>, Fault> {
        if self.origin != Origin::Raised {
            return Err(self);
        }

        match self.repr {
            Repr::Payload(payload) => Ok(payload),
            repr => Err(Fault { repr, ..self }),
        }
    }
}

impl<E> From<E> for Fault
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Fault::new(error)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Error(error) => write!(f, "{error}"),
            Repr::Payload(_) => match self.as_text() {
                Some(text) => f.write_str(text),
                None => write!(f, "<{}>", self.type_name),
            },
        }
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("type", &self.type_name)
            .field("name", &self.name)
            .field("display", &format_args!("{self}"))
            .field("origin", &self.origin)
            .finish()
    }
}

/// Last path segment of a type name, without generic arguments
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
