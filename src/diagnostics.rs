//! Structured, non-fatal problems collected during a run.
//!
//! Components return these instead of writing to a shared logger so callers
//! can test and report them. Each one is also emitted as a `tracing` event
//! when recorded.

use serde::Serialize;

/// Category of a recorded problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A report file could not be parsed and was skipped.
    MalformedInput,
    /// No report content or no issues were found.
    EmptyInput,
    /// A source file could not be read and was not rendered.
    SourceUnreadable,
    /// A page could not be rendered or written.
    RenderFailed,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::MalformedInput => write!(f, "malformed input"),
            DiagnosticKind::EmptyInput => write!(f, "empty input"),
            DiagnosticKind::SourceUnreadable => write!(f, "source unreadable"),
            DiagnosticKind::RenderFailed => write!(f, "render failed"),
        }
    }
}

/// A single non-fatal problem.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// File or directory the problem is about.
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic and log it at warn level.
    pub fn warn(kind: DiagnosticKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        let diagnostic = Self {
            kind,
            path: path.into(),
            message: message.into(),
        };
        tracing::warn!(kind = %diagnostic.kind, path = %diagnostic.path, "{}", diagnostic.message);
        diagnostic
    }
}
