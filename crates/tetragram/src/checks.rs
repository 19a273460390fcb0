//! Per-kind validation checks.
//!
//! Every check is a pure function of `(document, node, sink)`: it reads
//! the node (and, for nested constructs, the enclosing diagram found via
//! [`crate::scope`]), emits zero or more diagnostics, and returns. No
//! check mutates the document, retries, or aborts the pass.
//!
//! Uniqueness rules accept the first occurrence of a name silently and
//! attribute one error to every later occurrence, in declaration order.
//! Referential-integrity rules compare node identity, never name text:
//! a reference must resolve to exactly one of the nodes declared in the
//! matching collection of the correct enclosing diagram.

use std::collections::HashMap;

use tetragram_core::{Document, Id, NodeId, Reference, Span};

use crate::error::{Diagnostic, DiagnosticCode, DiagnosticCollector};

mod activity;
mod class;
mod sequence;
mod use_case;

pub use activity::{check_activity_diagram, check_data_flow, check_flow};
pub use class::{check_class_definition, check_class_diagram};
pub use sequence::{check_message, check_message_group, check_sequence_diagram};
pub use use_case::check_use_case_diagram;

/// Report every repeated name among `children`, attributing each error to
/// the later occurrence and pointing a secondary label at the first.
pub(crate) fn check_duplicate_names(
    doc: &Document,
    children: &[NodeId],
    noun: &str,
    code: DiagnosticCode,
    out: &mut DiagnosticCollector,
) {
    let mut seen: HashMap<Id, Span> = HashMap::new();
    for &child in children {
        let Some(name) = doc.name(child) else {
            continue;
        };
        let span = doc.name_span(child);
        if let Some(first) = seen.get(&name) {
            out.emit(
                Diagnostic::error(child, format!("{noun} `{name}` is declared multiple times"))
                    .with_code(code)
                    .with_label(span, "duplicate declaration")
                    .with_secondary_label(*first, "first declared here"),
            );
        } else {
            seen.insert(name, span);
        }
    }
}

/// Report a reference that is dangling or resolves outside the member set
/// accepted by `is_member`. The diagnostic targets `target`, the node
/// carrying the reference.
pub(crate) fn check_endpoint(
    target: NodeId,
    reference: &Reference,
    is_member: impl Fn(NodeId) -> bool,
    role: &str,
    missing: &str,
    code: DiagnosticCode,
    out: &mut DiagnosticCollector,
) {
    if reference.target().is_some_and(is_member) {
        return;
    }
    out.emit(
        Diagnostic::error(
            target,
            format!("{role} `{}` is {missing}", reference.name()),
        )
        .with_code(code)
        .with_label(reference.span(), "unknown reference"),
    );
}
