//! Serializable listing of a declaration

use crate::declaration::Declaration;
use crate::matcher::MatcherKind;
use crate::naming::handler_method_name;
use serde::{Deserialize, Serialize};

/// Exported view of one declared kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedKind {
    /// Kind name
    pub name: String,
    /// Registration method name
    pub method: String,
    /// Matcher rule
    pub matcher: MatcherKind,
    /// Rule operand (type path, literal or pattern source)
    pub rule: String,
}

impl Declaration {
    /// List every kind with its registration method name
    pub fn export(&self, prefix: &str) -> Vec<ExportedKind> {
        self.iter()
            .map(|kind| ExportedKind {
                name: kind.name().to_string(),
                method: handler_method_name(prefix, kind.name()),
                matcher: kind.spec().kind(),
                rule: kind.spec().describe(),
            })
            .collect()
    }

    /// Export as a JSON array
    pub fn export_json(&self, prefix: &str) -> serde_json::Result<String> {
        serde_json::to_string(&self.export(prefix))
    }
}
