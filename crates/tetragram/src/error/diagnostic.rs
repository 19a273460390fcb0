//! The core diagnostic type for the tetragram validator.
//!
//! A [`Diagnostic`] represents a single error or warning attributed to one
//! tree node, with optional code, labeled source spans, and help text.

use std::fmt;

use serde::Serialize;
use tetragram_core::{NodeId, Span};

use crate::error::{DiagnosticCode, Label, Severity};

/// A rich diagnostic message attached to a document tree node.
///
/// Diagnostics provide detailed information about errors and warnings,
/// including:
/// - A severity level
/// - An optional code for documentation and searchability
/// - A primary message describing the issue
/// - The offending node, so a consumer can map the finding back to a
///   source range or an editor marker
/// - Zero or more labeled source spans
/// - Optional help text with suggestions
///
/// # Example
///
/// ```
/// # use tetragram::error::{Diagnostic, DiagnosticCode};
/// # use tetragram_core::{Document, Span};
///
/// let doc = Document::new();
/// let diag = Diagnostic::error(doc.root(), "class `Order` is declared multiple times")
///     .with_code(DiagnosticCode::E300)
///     .with_label(Span::new(100..105), "duplicate declaration")
///     .with_secondary_label(Span::new(50..55), "first declared here")
///     .with_help("rename or remove one of the declarations");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    message: String,
    target: NodeId,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic attributed to `target`.
    pub fn error(target: NodeId, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, target, message)
    }

    /// Create a warning diagnostic attributed to `target`.
    pub fn warning(target: NodeId, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, target, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the diagnostic code, if any.
    pub fn code(&self) -> Option<DiagnosticCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The node this diagnostic is attributed to.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity, target, and message.
    fn new(severity: Severity, target: NodeId, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            target,
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E100]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
