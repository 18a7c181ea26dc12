//! Error kind declarations
//!
//! A [`Declaration`] is the fixed, ordered set of error kinds an operation
//! commits to. It is validated once when built and never changes afterwards.

use crate::error::{DeclarationError, Result};
use crate::matcher::MatcherSpec;
use crate::naming::{handler_method_name, DEFAULT_PREFIX};
use std::any::Any;
use std::collections::HashMap;

/// One declared error kind
#[derive(Debug, Clone)]
pub struct ErrorKind {
    name: String,
    spec: MatcherSpec,
}

impl ErrorKind {
    /// Kind name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rule deciding membership in this kind
    pub fn spec(&self) -> &MatcherSpec {
        &self.spec
    }
}

/// Ordered, non-empty set of uniquely named error kinds
#[derive(Debug, Clone)]
pub struct Declaration {
    kinds: Vec<ErrorKind>,
}

impl Declaration {
    /// Start building a declaration
    pub fn builder() -> DeclarationBuilder {
        DeclarationBuilder::default()
    }

    /// Declaration with a single kind
    pub fn single(name: impl Into<String>, spec: MatcherSpec) -> Result<Self> {
        Self::builder().kind(name, spec).build()
    }

    /// Number of declared kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false for a built declaration
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kinds in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorKind> {
        self.kinds.iter()
    }

    /// Kind names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(ErrorKind::name)
    }

    /// Look up a kind by name
    pub fn get(&self, name: &str) -> Option<&ErrorKind> {
        self.kinds.iter().find(|kind| kind.name == name)
    }

    /// Position of a kind by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.kinds.iter().position(|kind| kind.name == name)
    }

    /// Kind at a position
    pub fn kind_at(&self, index: usize) -> Option<&ErrorKind> {
        self.kinds.get(index)
    }

    /// Check that kind names and their registration method names under
    /// `prefix` are all distinct
    ///
    /// `foo` and `Foo` both register through `catchFoo`, and a kind named
    /// `catchBar` shadows the method of kind `bar`; both are rejected.
    pub fn check_method_names(&self, prefix: &str) -> Result<()> {
        let mut owners: HashMap<String, &str> = self
            .kinds
            .iter()
            .map(|kind| (kind.name.clone(), kind.name.as_str()))
            .collect();

        for kind in &self.kinds {
            let method = handler_method_name(prefix, &kind.name);
            if let Some(first) = owners.insert(method.clone(), &kind.name) {
                return Err(DeclarationError::MethodNameCollision {
                    method,
                    first: first.to_string(),
                    second: kind.name.clone(),
                });
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Declaration {
    type Item = &'a ErrorKind;
    type IntoIter = std::slice::Iter<'a, ErrorKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`Declaration`]
///
/// The first failure is remembered and reported by [`build`](Self::build),
/// so calls can be chained without intermediate `?`.
#[derive(Debug, Default)]
pub struct DeclarationBuilder {
    kinds: Vec<ErrorKind>,
    error: Option<DeclarationError>,
}

impl DeclarationBuilder {
    /// Declare a kind with an explicit matcher
    pub fn kind(mut self, name: impl Into<String>, spec: MatcherSpec) -> Self {
        self.kinds.push(ErrorKind {
            name: name.into(),
            spec,
        });
        self
    }

    /// Declare a kind matched by the type `E`
    pub fn type_tag<E: Any>(self, name: impl Into<String>) -> Self {
        self.kind(name, MatcherSpec::type_tag::<E>())
    }

    /// Declare a kind matched by a substring
    pub fn literal(self, name: impl Into<String>, literal: impl Into<String>) -> Self {
        self.kind(name, MatcherSpec::literal(literal))
    }

    /// Declare a kind matched by a regular expression
    pub fn pattern(mut self, name: impl Into<String>, pattern: &str) -> Self {
        match MatcherSpec::pattern(pattern) {
            Ok(spec) => self.kind(name, spec),
            Err(error) => {
                self.error.get_or_insert(error);
                self
            }
        }
    }

    /// Validate and build
    pub fn build(self) -> Result<Declaration> {
        if let Some(error) = self.error {
            return Err(error);
        }

        if self.kinds.is_empty() {
            return Err(DeclarationError::Empty);
        }

        for (index, kind) in self.kinds.iter().enumerate() {
            if !is_valid_kind_name(&kind.name) {
                return Err(DeclarationError::InvalidKindName {
                    name: kind.name.clone(),
                });
            }

            if self.kinds[..index].iter().any(|other| other.name == kind.name) {
                return Err(DeclarationError::DuplicateKind {
                    name: kind.name.clone(),
                });
            }
        }

        let declaration = Declaration { kinds: self.kinds };
        declaration.check_method_names(DEFAULT_PREFIX)?;
        Ok(declaration)
    }
}

fn is_valid_kind_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

/// Build a [`Declaration`] from `Name => spec` pairs
///
/// Expands to a [`DeclarationBuilder`] chain and evaluates to the
/// `Result` of [`DeclarationBuilder::build`].
///
/// ```
/// use throwguard_core::{declaration, MatcherSpec};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("string was empty")]
/// struct EmptyError;
///
/// let declaration = declaration! {
///     Empty => MatcherSpec::type_tag::<EmptyError>(),
///     Timeout => MatcherSpec::literal("timed out"),
/// }
/// .unwrap();
///
/// assert_eq!(declaration.len(), 2);
/// ```
#[macro_export]
macro_rules! declaration {
    (
        $(
            $name:ident => $spec:expr
        ),+ $(,)?
    ) => {
        $crate::Declaration::builder()
            $(
                .kind(stringify!($name), $spec)
            )+
            .build()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_declaration_order() {
        let declaration = Declaration::builder()
            .literal("Zeta", "z")
            .literal("Alpha", "a")
            .literal("Mid", "m")
            .build()
            .unwrap();

        let names: Vec<_> = declaration.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(declaration.index_of("Mid"), Some(2));
        assert!(declaration.get("Missing").is_none());
    }

    #[test]
    fn test_first_pattern_error_wins() {
        let result = Declaration::builder()
            .pattern("Broken", "(")
            .pattern("AlsoBroken", "[")
            .build();
        assert!(matches!(result, Err(DeclarationError::InvalidPattern(_))));
    }

    #[test]
    fn test_case_variants_collide_on_method_name() {
        let result = Declaration::builder()
            .literal("foo", "a")
            .literal("Foo", "b")
            .build();

        match result {
            Err(DeclarationError::MethodNameCollision {
                method,
                first,
                second,
            }) => {
                assert_eq!(method, "catchFoo");
                assert_eq!(first, "foo");
                assert_eq!(second, "Foo");
            }
            other => panic!("expected method name collision, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_named_like_a_method_collides() {
        let result = Declaration::builder()
            .literal("catchBar", "a")
            .literal("bar", "b")
            .build();
        assert!(matches!(
            result,
            Err(DeclarationError::MethodNameCollision { ref first, .. }) if first == "catchBar"
        ));
    }

    #[test]
    fn test_collisions_depend_on_prefix() {
        let declaration = Declaration::builder()
            .literal("x", "a")
            .literal("onX", "b")
            .build()
            .unwrap();

        assert!(declaration.check_method_names("catch").is_ok());
        assert!(matches!(
            declaration.check_method_names("on"),
            Err(DeclarationError::MethodNameCollision { .. })
        ));
    }

    #[test]
    fn test_kind_name_validation() {
        assert!(is_valid_kind_name("StringEmptyError"));
        assert!(!is_valid_kind_name(""));
        assert!(!is_valid_kind_name("two words"));
    }
}
