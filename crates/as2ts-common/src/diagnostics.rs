//! Diagnostic types and message lookup for the transpiler.
//!
//! Every problem found while generating code is one of a small, closed set of
//! kinds. Each kind has a stable code (rendered as `AS<code>`), a default
//! category, and a message template with `{0}`, `{1}` placeholders.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// The closed taxonomy of generation problems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// A node category that is intentionally not translated.
    UnsupportedConstruct,
    /// A structural precondition failed, e.g. a class declaration without a name.
    MissingRequiredField,
    /// An operator with no entry in the precedence table.
    UnknownOperatorPriority,
    /// A node tag the syntax model does not know at all.
    UnrecognizedNode,
}

impl DiagnosticKind {
    pub const fn code(self) -> u32 {
        match self {
            DiagnosticKind::UnsupportedConstruct => 9001,
            DiagnosticKind::MissingRequiredField => 9002,
            DiagnosticKind::UnknownOperatorPriority => 9003,
            DiagnosticKind::UnrecognizedNode => 9004,
        }
    }

    /// Default category. Only table misses are survivable without a fallback.
    pub const fn category(self) -> DiagnosticCategory {
        match self {
            DiagnosticKind::UnknownOperatorPriority => DiagnosticCategory::Warning,
            _ => DiagnosticCategory::Error,
        }
    }

    /// Message template for this kind.
    pub const fn template(self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedConstruct => "Not support {0} yet!",
            DiagnosticKind::MissingRequiredField => "{0} is necessary!",
            DiagnosticKind::UnknownOperatorPriority => "No priority for operator pattern '{0}'.",
            DiagnosticKind::UnrecognizedNode => "Unrecognized node type '{0}'.",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        [
            DiagnosticKind::UnsupportedConstruct,
            DiagnosticKind::MissingRequiredField,
            DiagnosticKind::UnknownOperatorPriority,
            DiagnosticKind::UnrecognizedNode,
        ]
        .into_iter()
        .find(|kind| kind.code() == code)
    }
}

/// A generation diagnostic anchored at a line/column of one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a diagnostic of the given kind, filling its template with `args`.
    #[must_use]
    pub fn new(kind: DiagnosticKind, file: impl Into<String>, line: u32, column: u32, args: &[&str]) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            message_text: format_message(kind.template(), args),
            category: kind.category(),
            code: kind.code(),
        }
    }

    /// Create a diagnostic with a caller-supplied message.
    #[must_use]
    pub fn with_message(
        kind: DiagnosticKind,
        file: impl Into<String>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            message_text: message.into(),
            category: kind.category(),
            code: kind.code(),
        }
    }

    pub fn kind(&self) -> Option<DiagnosticKind> {
        DiagnosticKind::from_code(self.code)
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
