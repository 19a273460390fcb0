//! The ValidationError type for wrapping validation diagnostics.
//!
//! [`ValidationError`] wraps one or more [`Diagnostic`]s for consumers
//! that treat a pass with errors as a failed step (build pipelines,
//! pre-save hooks). Rule violations themselves are never raised as
//! errors mid-pass; this wrapper only exists at the boundary.

use std::fmt;

use crate::error::Diagnostic;

/// Error type summarizing a validation pass that found errors.
///
/// Wraps the full ordered diagnostic sequence, warnings included.
#[derive(Debug)]
pub struct ValidationError {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    /// Create a new validation error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<Diagnostic> for ValidationError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ValidationError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
