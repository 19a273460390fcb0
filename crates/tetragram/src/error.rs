//! Diagnostic system for the tetragram validator.
//!
//! This module provides the reporting side of semantic validation:
//! - Diagnostic codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - A diagnostic collector for accumulating every finding of a pass
//!
//! # Overview
//!
//! The system is built around the [`Diagnostic`] type, which represents a
//! single error or warning attached to one tree node, with optional code,
//! source labels, and help text. Checkers append diagnostics to a
//! [`DiagnosticCollector`]; consumers either read the ordered sequence
//! directly or convert it with [`DiagnosticCollector::finish`] into a
//! [`ValidationError`].
//!
//! # Example
//!
//! ```
//! # use tetragram::error::{Diagnostic, DiagnosticCode};
//! # use tetragram_core::{Document, Span};
//!
//! let doc = Document::new();
//! let span = Span::new(100..120);
//! let original_span = Span::new(50..70);
//!
//! let diag = Diagnostic::error(doc.root(), "actor `customer` is declared multiple times")
//!     .with_code(DiagnosticCode::E100)
//!     .with_label(span, "duplicate declaration")
//!     .with_secondary_label(original_span, "first declared here")
//!     .with_help("rename or remove one of the declarations");
//! ```

mod code;
mod collector;
mod diagnostic;
mod label;
mod severity;
mod validation_error;

pub use code::DiagnosticCode;
pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use label::Label;
pub use severity::Severity;
pub use validation_error::ValidationError;
