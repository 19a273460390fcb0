//! Collector for accumulating diagnostics during a validation pass.
//!
//! The [`DiagnosticCollector`] is the sink every checker reports into.
//! It keeps diagnostics in emission order, performs no deduplication, and
//! never aborts a pass: detecting one violation never prevents detecting
//! the rest.

use crate::error::{Diagnostic, ValidationError};

/// A collector for accumulating diagnostics during a validation pass.
///
/// # Example
///
/// ```
/// # use tetragram::error::{Diagnostic, DiagnosticCode, DiagnosticCollector};
/// # use tetragram_core::{Document, Span};
///
/// let doc = Document::new();
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::error(doc.root(), "participant `cart` is declared multiple times")
///         .with_code(DiagnosticCode::E200)
///         .with_label(Span::new(0..4), "duplicate declaration"),
/// );
///
/// assert!(collector.has_errors());
/// assert_eq!(collector.diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is appended to the collection, and if it is an
    /// error, the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Whether any error-severity diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// The diagnostics emitted so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector, returning the ordered diagnostic sequence.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ValidationError)` carrying all
    ///   diagnostics, warnings included.
    /// - If there are no errors, returns `Ok(())`; warnings alone do not
    ///   fail the pass and are discarded by this conversion.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.has_errors {
            Err(ValidationError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}
