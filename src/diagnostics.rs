//! Non-fatal findings produced while classifying and resolving members.
//!
//! Synthesis never aborts: a malformed member is skipped, an unresolvable type
//! degrades to the text fallback, and each such decision is recorded here so
//! the caller can surface it.
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Note,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Binding pattern is not a simple identifier; the binding was skipped.
    MalformedDeclarationShape,
    /// No annotation and no literal shape; the type fell back to text.
    TypeInferenceFallback,
    /// No initializer; the emitted default is a zero-argument construction.
    UnconstructibleDefaultFallback,
    /// Two eligible fields share a name. Keys are emitted as-is.
    DuplicateFieldName,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::MalformedDeclarationShape
            | DiagnosticKind::TypeInferenceFallback
            | DiagnosticKind::DuplicateFieldName => Severity::Warning,
            DiagnosticKind::UnconstructibleDefaultFallback => Severity::Note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Field name, or the rendered pattern for skipped bindings.
    pub member: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, member: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            member: member.into(),
            message: message.into(),
        }
    }

    pub fn malformed_pattern(pattern: &str) -> Self {
        Self::new(
            DiagnosticKind::MalformedDeclarationShape,
            pattern,
            format!("binding pattern `{pattern}` is not a simple identifier; member skipped"),
        )
    }

    pub fn type_fallback(name: &str, fallback: &str, initializer: Option<&str>) -> Self {
        let why = match initializer {
            Some(expr) => format!("initializer `{expr}` is not a literal"),
            None => "no initializer".to_string(),
        };
        Self::new(
            DiagnosticKind::TypeInferenceFallback,
            name,
            format!("`{name}` has no type annotation and {why}; assuming `{fallback}` (add an explicit annotation)"),
        )
    }

    pub fn synthesized_default(name: &str, default_expr: &str) -> Self {
        Self::new(
            DiagnosticKind::UnconstructibleDefaultFallback,
            name,
            format!("`{name}` has no initializer; falling back to `{default_expr}`, which must be a valid zero-argument initializer"),
        )
    }

    pub fn duplicate_name(name: &str, count: usize) -> Self {
        Self::new(
            DiagnosticKind::DuplicateFieldName,
            name,
            format!("`{name}` is declared {count} times; generated keys will collide"),
        )
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Terminal rendering, `origin` being the file or type the finding belongs to.
    pub fn render_colored(&self, origin: &str) -> String {
        let label = match self.severity {
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".cyan().bold(),
        };
        format!("{label}: {}: {}", origin.bold(), self.message)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
        })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
