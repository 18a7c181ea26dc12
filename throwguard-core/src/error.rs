//! Declaration error types

use thiserror::Error;

/// Errors raised while assembling an error kind declaration
#[derive(Error, Debug)]
pub enum DeclarationError {
    /// No kinds were declared
    #[error("declaration must name at least one error kind")]
    Empty,

    /// Two kinds share a name
    #[error("error kind '{name}' is declared more than once")]
    DuplicateKind {
        /// The repeated kind name
        name: String,
    },

    /// Kind name cannot be turned into a registration method
    #[error("invalid error kind name '{name}'")]
    InvalidKindName {
        /// The rejected kind name
        name: String,
    },

    /// Two kinds would share a registration method name
    #[error("registration method '{method}' would name both '{first}' and '{second}'")]
    MethodNameCollision {
        /// The shared method name
        method: String,
        /// Kind already owning the name
        first: String,
        /// Kind whose method name clashes
        second: String,
    },

    /// Pattern matcher failed to compile
    #[error("invalid matcher pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for declaration operations
pub type Result<T> = std::result::Result<T, DeclarationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_kind_display() {
        let error = DeclarationError::DuplicateKind {
            name: "Empty".to_string(),
        };
        assert_eq!(error.to_string(), "error kind 'Empty' is declared more than once");
    }

    #[test]
    fn test_method_collision_display() {
        let error = DeclarationError::MethodNameCollision {
            method: "catchFoo".to_string(),
            first: "foo".to_string(),
            second: "Foo".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "registration method 'catchFoo' would name both 'foo' and 'Foo'"
        );
    }

    #[test]
    fn test_pattern_error_conversion() {
        let regex_error = regex::Regex::new("(unclosed").unwrap_err();
        let error: DeclarationError = regex_error.into();
        assert!(matches!(error, DeclarationError::InvalidPattern(_)));
    }
}
