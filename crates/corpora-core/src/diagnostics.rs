//! Structured diagnostics for the normalizer and tree builder.
//!
//! Per-row failures never abort a batch. They are collected as `Diagnostic`
//! values and returned alongside the result, so callers (CLI, tests) decide
//! whether and how to surface them.
//!
//! Codes are dot-delimited and stable:
//! - `row.*` — problems detected while normalizing or classifying a row
//! - `build.*` — linkage problems detected while assembling the tree

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// A structured diagnostic emitted during a build pass.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_constructor_sets_level() {
        let d = Diagnostic::warning("build.orphan_version", "no parent");
        assert!(d.is_warning());
        assert_eq!(d.code, "build.orphan_version");
    }
}
