//! Matcher specifications
//!
//! Decides whether a [`Fault`] belongs to a declared error kind. Three rules
//! exist: an exact type check, a substring search and a regular expression.
//! The textual rules look at the fault's name first and its message second;
//! a fault wrapping a bare string is tested on the string itself.

use crate::error::Result;
use crate::fault::{short_type_name, Fault};
use regex::Regex;
use std::any::{type_name, Any, TypeId};
use std::fmt;

/// Runtime identity of a declared error type
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    type_name: &'static str,
}

impl TypeTag {
    /// Tag for the type `E`
    pub fn of<E: Any>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
        }
    }

    /// `TypeId` of the tagged type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Short name of the tagged type
    pub fn name(&self) -> &'static str {
        short_type_name(self.type_name)
    }

    /// Full path of the tagged type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.type_name).finish()
    }
}

/// Rule that decides membership in a declared error kind
#[derive(Debug, Clone)]
pub enum MatcherSpec {
    /// Value is exactly the tagged type
    TypeTag(TypeTag),
    /// Name or message contains the literal
    Literal(String),
    /// Name or message matches the pattern
    Pattern(Regex),
}

/// Discriminant of a [`MatcherSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatcherKind {
    /// Type check
    TypeTag,
    /// Substring search
    Literal,
    /// Regular expression
    Pattern,
}

impl MatcherSpec {
    /// Match values of type `E`
    pub fn type_tag<E: Any>() -> Self {
        MatcherSpec::TypeTag(TypeTag::of::<E>())
    }

    /// Match names or messages containing `literal`
    pub fn literal(literal: impl Into<String>) -> Self {
        MatcherSpec::Literal(literal.into())
    }

    /// Match names or messages against a regular expression
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(MatcherSpec::Pattern(Regex::new(pattern)?))
    }

    /// Which rule this is
    pub fn kind(&self) -> MatcherKind {
        match self {
            MatcherSpec::TypeTag(_) => MatcherKind::TypeTag,
            MatcherSpec::Literal(_) => MatcherKind::Literal,
            MatcherSpec::Pattern(_) => MatcherKind::Pattern,
        }
    }

    /// Human-readable form of the rule's operand
    pub fn describe(&self) -> String {
        match self {
            MatcherSpec::TypeTag(tag) => tag.type_name().to_string(),
            MatcherSpec::Literal(literal) => literal.clone(),
            MatcherSpec::Pattern(regex) => regex.as_str().to_string(),
        }
    }

    /// Test a fault against this rule
    pub fn matches(&self, fault: &Fault) -> bool {
        matches(fault, self)
    }
}

impl From<TypeTag> for MatcherSpec {
    fn from(tag: TypeTag) -> Self {
        MatcherSpec::TypeTag(tag)
    }
}

impl From<Regex> for MatcherSpec {
    fn from(regex: Regex) -> Self {
        MatcherSpec::Pattern(regex)
    }
}

/// Decide whether `fault` belongs to the kind described by `spec`
pub fn matches(fault: &Fault, spec: &MatcherSpec) -> bool {
    match spec {
        MatcherSpec::TypeTag(tag) => fault.value_type_id() == tag.id(),
        MatcherSpec::Literal(literal) => probe(fault, |field| field.contains(literal.as_str())),
        MatcherSpec::Pattern(regex) => probe(fault, |field| regex.is_match(field)),
    }
}

fn probe(fault: &Fault, test: impl Fn(&str) -> bool) -> bool {
    if let Some(text) = fault.as_text() {
        return test(text);
    }

    if fault.name().is_some_and(&test) {
        return true;
    }

    fault.message().is_some_and(|message| test(&message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::GenericError;

    #[derive(thiserror::Error, Debug)]
    #[error("bad string")]
    struct BadStringError;

    #[test]
    fn test_type_tag_identity() {
        assert_eq!(TypeTag::of::<BadStringError>(), TypeTag::of::<BadStringError>());
        assert_ne!(TypeTag::of::<BadStringError>(), TypeTag::of::<GenericError>());
        assert_eq!(TypeTag::of::<BadStringError>().name(), "BadStringError");
    }

    #[test]
    fn test_kind_and_describe() {
        let spec = MatcherSpec::literal("timeout");
        assert_eq!(spec.kind(), MatcherKind::Literal);
        assert_eq!(spec.describe(), "timeout");

        let spec = MatcherSpec::pattern("^Http").unwrap();
        assert_eq!(spec.kind(), MatcherKind::Pattern);
        assert_eq!(spec.describe(), "^Http");
    }

    #[test]
    fn test_name_checked_before_message() {
        let fault = Fault::new(GenericError::named("TimeoutError", "request failed"));
        assert!(MatcherSpec::literal("Timeout").matches(&fault));
        assert!(MatcherSpec::literal("failed").matches(&fault));
        assert!(!MatcherSpec::literal("refused").matches(&fault));
    }

    #[test]
    fn test_value_faults_only_match_by_type() {
        let fault = Fault::value(7_i32);
        assert!(!MatcherSpec::literal("").matches(&fault));
        assert!(!MatcherSpec::pattern(".*").unwrap().matches(&fault));
        assert!(MatcherSpec::type_tag::<i32>().matches(&fault));
    }
}
