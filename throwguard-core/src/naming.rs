//! Registration method names
//!
//! A kind named `stringEmpty` is registered through `catchStringEmpty`: a
//! fixed prefix followed by the kind name with its first character
//! upper-cased.

/// Prefix used unless configured otherwise
pub const DEFAULT_PREFIX: &str = "catch";

/// Registration method name for a kind
pub fn handler_method_name(prefix: &str, kind: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + kind.len());
    name.push_str(prefix);

    let mut chars = kind.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }

    name
}

/// Whether `prefix` yields identifier-like method names
pub fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
