//! Checks for class diagrams and class definitions.

use std::collections::HashMap;

use tetragram_core::{Document, Id, NodeData, NodeId, Span};

use crate::checks::{check_duplicate_names, check_endpoint};
use crate::error::{Diagnostic, DiagnosticCode, DiagnosticCollector};

/// Validate one class diagram: class name uniqueness and relationship
/// endpoints resolving to classes of the same diagram.
pub fn check_class_diagram(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::ClassDiagram(diagram) = doc.data(id) else {
        return;
    };

    check_duplicate_names(doc, &diagram.classes, "class", DiagnosticCode::E300, out);

    let is_class = |node: NodeId| diagram.classes.contains(&node);
    for &relationship in &diagram.relationships {
        let NodeData::Relationship(r) = doc.data(relationship) else {
            continue;
        };
        check_endpoint(
            relationship,
            &r.from_class,
            &is_class,
            "relationship source",
            "not a class of this diagram",
            DiagnosticCode::E303,
            out,
        );
        check_endpoint(
            relationship,
            &r.to_class,
            &is_class,
            "relationship target",
            "not a class of this diagram",
            DiagnosticCode::E303,
            out,
        );
    }
}

/// Validate one class definition: attribute name uniqueness and method
/// signature uniqueness.
///
/// A method signature is its name plus its parameter count, so methods
/// may share a name as long as their arities differ.
pub fn check_class_definition(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::ClassDefinition(class) = doc.data(id) else {
        return;
    };

    check_duplicate_names(
        doc,
        &class.attributes,
        "attribute",
        DiagnosticCode::E301,
        out,
    );

    let mut seen: HashMap<(Id, usize), Span> = HashMap::new();
    for &method in &class.methods {
        let NodeData::Method(m) = doc.data(method) else {
            continue;
        };
        let name = *m.name.inner();
        let arity = m.parameters.len();
        let span = doc.name_span(method);
        if let Some(first) = seen.get(&(name, arity)) {
            out.emit(
                Diagnostic::error(
                    method,
                    format!("method `{name}` with {arity} parameter(s) is declared multiple times"),
                )
                .with_code(DiagnosticCode::E302)
                .with_label(span, "duplicate signature")
                .with_secondary_label(*first, "first declared here")
                .with_help("methods may share a name only when their parameter counts differ"),
            );
        } else {
            seen.insert((name, arity), span);
        }
    }
}
