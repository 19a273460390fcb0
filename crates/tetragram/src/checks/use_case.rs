//! Checks for use-case diagrams.

use tetragram_core::{Document, NodeData, NodeId};

use crate::checks::{check_duplicate_names, check_endpoint};
use crate::error::{DiagnosticCode, DiagnosticCollector};

/// Validate one use-case diagram.
///
/// Actor names and use-case names must each be unique within the diagram
/// (the two namespaces are independent), and every relation endpoint must
/// resolve to an actor, use case, or rectangle declared by this diagram.
pub fn check_use_case_diagram(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::UseCaseDiagram(diagram) = doc.data(id) else {
        return;
    };

    check_duplicate_names(doc, &diagram.actors, "actor", DiagnosticCode::E100, out);
    check_duplicate_names(
        doc,
        &diagram.use_cases,
        "use case",
        DiagnosticCode::E101,
        out,
    );

    let is_element = |node: NodeId| {
        diagram.actors.contains(&node)
            || diagram.use_cases.contains(&node)
            || diagram.rectangles.contains(&node)
    };
    for &relation in &diagram.relations {
        let NodeData::Relation(r) = doc.data(relation) else {
            continue;
        };
        check_endpoint(
            relation,
            &r.from,
            &is_element,
            "relation source",
            "not an element of this diagram",
            DiagnosticCode::E102,
            out,
        );
        check_endpoint(
            relation,
            &r.to,
            &is_element,
            "relation target",
            "not an element of this diagram",
            DiagnosticCode::E102,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use tetragram_core::ast::{
        Actor, Rectangle, Reference, Relation, RelationKind, UseCase, UseCaseDiagram,
    };
    use tetragram_core::{Document, Id, NodeData, Span, Spanned};

    use super::*;
    use crate::error::Diagnostic;

    fn name(text: &str, start: usize) -> Spanned<Id> {
        Spanned::new(Id::new(text), Span::new(start..start + text.len()))
    }

    fn diagram() -> (Document, NodeId) {
        let mut doc = Document::new();
        let id = doc
            .insert(
                doc.root(),
                Span::new(0..400),
                NodeData::UseCaseDiagram(UseCaseDiagram::new(name("Shop", 16))),
            )
            .expect("diagram under model");
        (doc, id)
    }

    fn actor(doc: &mut Document, diagram: NodeId, text: &str, start: usize) -> NodeId {
        doc.insert(
            diagram,
            Span::new(start..start + text.len()),
            NodeData::Actor(Actor {
                name: name(text, start),
            }),
        )
        .expect("actor under diagram")
    }

    fn use_case(doc: &mut Document, diagram: NodeId, text: &str, start: usize) -> NodeId {
        doc.insert(
            diagram,
            Span::new(start..start + text.len()),
            NodeData::UseCase(UseCase {
                name: name(text, start),
                description: None,
                extension_points: Vec::new(),
            }),
        )
        .expect("use case under diagram")
    }

    fn rectangle(doc: &mut Document, diagram: NodeId, text: &str, start: usize) -> NodeId {
        doc.insert(
            diagram,
            Span::new(start..start + text.len()),
            NodeData::Rectangle(Rectangle {
                name: name(text, start),
            }),
        )
        .expect("rectangle under diagram")
    }

    fn relation(doc: &mut Document, diagram: NodeId, from: Reference, to: Reference) -> NodeId {
        doc.insert(
            diagram,
            Span::new(300..320),
            NodeData::Relation(Relation {
                from,
                to,
                kind: RelationKind::Normal,
                direction: None,
                length: None,
            }),
        )
        .expect("relation under diagram")
    }

    fn run(doc: &Document, id: NodeId) -> Vec<Diagnostic> {
        let mut out = DiagnosticCollector::new();
        check_use_case_diagram(doc, id, &mut out);
        out.into_diagnostics()
    }

    #[test]
    fn test_unique_names_pass() {
        let (mut doc, diagram_id) = diagram();
        actor(&mut doc, diagram_id, "customer", 30);
        actor(&mut doc, diagram_id, "admin", 50);
        use_case(&mut doc, diagram_id, "Browse", 70);

        assert!(run(&doc, diagram_id).is_empty());
    }

    #[test]
    fn test_duplicate_actors_blame_later_occurrences() {
        let (mut doc, diagram_id) = diagram();
        let first = actor(&mut doc, diagram_id, "customer", 30);
        let second = actor(&mut doc, diagram_id, "customer", 50);
        let third = actor(&mut doc, diagram_id, "customer", 70);

        let diagnostics = run(&doc, diagram_id);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].target(), second);
        assert_eq!(diagnostics[1].target(), third);
        for diag in &diagnostics {
            assert!(diag.severity().is_error());
            assert_eq!(diag.code(), Some(DiagnosticCode::E100));
            assert_ne!(diag.target(), first);
        }
        // The secondary label points at the first declaration.
        assert_eq!(diagnostics[0].labels()[1].span(), Span::new(30..38));
    }

    #[test]
    fn test_duplicate_use_cases() {
        let (mut doc, diagram_id) = diagram();
        use_case(&mut doc, diagram_id, "Checkout", 30);
        let second = use_case(&mut doc, diagram_id, "Checkout", 60);

        let diagnostics = run(&doc, diagram_id);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].target(), second);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::E101));
    }

    #[test]
    fn test_actor_and_use_case_namespaces_are_independent() {
        let (mut doc, diagram_id) = diagram();
        actor(&mut doc, diagram_id, "payment", 30);
        use_case(&mut doc, diagram_id, "payment", 50);

        assert!(run(&doc, diagram_id).is_empty());
    }

    #[test]
    fn test_relation_to_declared_elements_passes() {
        let (mut doc, diagram_id) = diagram();
        let customer = actor(&mut doc, diagram_id, "customer", 30);
        let browse = use_case(&mut doc, diagram_id, "Browse", 50);
        let boundary = rectangle(&mut doc, diagram_id, "Storefront", 70);
        relation(
            &mut doc,
            diagram_id,
            Reference::resolved(name("customer", 300), customer),
            Reference::resolved(name("Browse", 310), browse),
        );
        relation(
            &mut doc,
            diagram_id,
            Reference::resolved(name("Browse", 320), browse),
            Reference::resolved(name("Storefront", 330), boundary),
        );

        assert!(run(&doc, diagram_id).is_empty());
    }

    #[test]
    fn test_dangling_relation_source() {
        let (mut doc, diagram_id) = diagram();
        let browse = use_case(&mut doc, diagram_id, "Browse", 50);
        let rel = relation(
            &mut doc,
            diagram_id,
            Reference::dangling(name("ghost", 300)),
            Reference::resolved(name("Browse", 310), browse),
        );

        let diagnostics = run(&doc, diagram_id);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].target(), rel);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::E102));
        assert!(diagnostics[0].message().contains("ghost"));
    }

    #[test]
    fn test_relation_resolved_into_another_diagram() {
        let (mut doc, first_diagram) = diagram();
        let browse = use_case(&mut doc, first_diagram, "Browse", 50);

        let second_diagram = doc
            .insert(
                doc.root(),
                Span::new(400..600),
                NodeData::UseCaseDiagram(UseCaseDiagram::new(name("Billing", 416))),
            )
            .expect("second diagram under model");
        let foreign_actor = actor(&mut doc, second_diagram, "customer", 430);

        // The linker resolved `customer` into the other diagram.
        let rel = relation(
            &mut doc,
            first_diagram,
            Reference::resolved(name("customer", 300), foreign_actor),
            Reference::resolved(name("Browse", 310), browse),
        );

        let diagnostics = run(&doc, first_diagram);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].target(), rel);
    }

    #[test]
    fn test_relation_with_two_bad_endpoints_reports_twice() {
        let (mut doc, diagram_id) = diagram();
        actor(&mut doc, diagram_id, "customer", 30);
        relation(
            &mut doc,
            diagram_id,
            Reference::dangling(name("nobody", 300)),
            Reference::dangling(name("nothing", 310)),
        );

        let diagnostics = run(&doc, diagram_id);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message().contains("relation source"));
        assert!(diagnostics[1].message().contains("relation target"));
    }
}
