//! # Tetragram Validator
//!
//! Semantic validation for tetragram diagram documents. This crate checks
//! the uniqueness and referential-integrity rules the grammar cannot
//! enforce: the grammar accepts any cross-reference token, and only
//! semantic analysis can tell whether it resolves to a real, in-scope
//! element.
//!
//! The pipeline position is:
//!
//! ```text
//! Source Text
//!     ↓ parser + linker (upstream)
//! Document tree (tetragram_core::ast) - parent links, resolved references
//!     ↓ validate (this crate)
//! Diagnostics - ordered {severity, code, message, target node, labels}
//! ```
//!
//! The validator never mutates the tree, retains no state between passes,
//! and never raises a rule violation as an error: every finding flows
//! through the [`error::DiagnosticCollector`] sink. Running the same pass
//! twice over an unchanged document yields an identical sequence.
//!
//! ## Usage
//!
//! ```
//! # use tetragram_core::ast::{Actor, Document, NodeData, UseCaseDiagram};
//! # use tetragram_core::{Id, Span, Spanned};
//! let mut doc = Document::new();
//! let diagram = doc
//!     .insert(
//!         doc.root(),
//!         Span::new(0..120),
//!         NodeData::UseCaseDiagram(UseCaseDiagram::new(Spanned::new(
//!             Id::new("Shop"),
//!             Span::new(16..20),
//!         ))),
//!     )
//!     .unwrap();
//! for start in [30, 50] {
//!     doc.insert(
//!         diagram,
//!         Span::new(start..start + 8),
//!         NodeData::Actor(Actor {
//!             name: Spanned::new(Id::new("customer"), Span::new(start..start + 8)),
//!         }),
//!     )
//!     .unwrap();
//! }
//!
//! let diagnostics = tetragram::validate(&doc);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(
//!     diagnostics[0].to_string(),
//!     "error[E100]: actor `customer` is declared multiple times"
//! );
//! ```

pub mod checks;
pub mod error;
pub mod registry;
pub mod scope;

pub use error::{
    Diagnostic, DiagnosticCode, DiagnosticCollector, Label, Severity, ValidationError,
};
pub use registry::{Checker, ValidationRegistry, default_registry};

use log::debug;
use tetragram_core::Document;

/// Run one validation pass with the default check set.
///
/// Returns every diagnostic of the pass in emission order; an empty
/// vector means the document is clean.
pub fn validate(doc: &Document) -> Vec<Diagnostic> {
    validate_with(doc, default_registry())
}

/// Run one validation pass with a caller-assembled registry.
///
/// The document is traversed once in document order; each node whose kind
/// is registered is handed to its checkers exactly once, all sharing one
/// sink.
pub fn validate_with(doc: &Document, registry: &ValidationRegistry) -> Vec<Diagnostic> {
    debug!(nodes = doc.len(); "starting validation pass");
    let mut collector = DiagnosticCollector::new();
    run_pass(doc, registry, &mut collector);
    let diagnostics = collector.into_diagnostics();
    debug!(diagnostics = diagnostics.len(); "validation pass finished");
    diagnostics
}

/// Run one validation pass and fail on errors.
///
/// Convenience for pipelines that gate on validity: `Ok(())` when the
/// pass produced no error-severity diagnostics (warnings alone pass),
/// otherwise a [`ValidationError`] carrying the full sequence.
pub fn check_document(doc: &Document) -> Result<(), ValidationError> {
    let mut collector = DiagnosticCollector::new();
    run_pass(doc, default_registry(), &mut collector);
    collector.finish()
}

fn run_pass(doc: &Document, registry: &ValidationRegistry, collector: &mut DiagnosticCollector) {
    for id in doc.node_ids() {
        for checker in registry.checkers(doc.kind(id)) {
            checker(doc, id, collector);
        }
    }
}
