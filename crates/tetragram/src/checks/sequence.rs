//! Checks for sequence diagrams, message groups, and messages.
//!
//! Messages appear either directly in a diagram's interaction list or
//! inside a branch of a message group, nested to any depth. Both
//! positions validate against the participant list of the *nearest
//! enclosing* sequence diagram: the diagram checker covers its direct
//! children, and the group checker covers each group's branches, so every
//! message is covered exactly once however deep it sits.

use tetragram_core::ast::Message;
use tetragram_core::{Document, NodeData, NodeId};

use crate::checks::{check_duplicate_names, check_endpoint};
use crate::error::{Diagnostic, DiagnosticCode, DiagnosticCollector};
use crate::scope;

/// Validate one sequence diagram: participant name uniqueness and the
/// endpoints of messages appearing directly in its interaction list.
pub fn check_sequence_diagram(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::SequenceDiagram(diagram) = doc.data(id) else {
        return;
    };

    check_duplicate_names(
        doc,
        &diagram.participants,
        "participant",
        DiagnosticCode::E200,
        out,
    );

    for &interaction in &diagram.interactions {
        if let NodeData::Message(message) = doc.data(interaction) {
            check_message_endpoints(interaction, message, &diagram.participants, out);
        }
    }
}

/// Validate the messages held by a group's branches against the nearest
/// enclosing sequence diagram.
///
/// Groups nested inside this group's branches are validated by their own
/// registry dispatch, not recursively from here. A group with no
/// enclosing sequence diagram is skipped.
pub fn check_message_group(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::MessageGroup(group) = doc.data(id) else {
        return;
    };
    let Some(enclosing) = scope::enclosing_sequence_diagram(doc, id) else {
        return;
    };
    let NodeData::SequenceDiagram(diagram) = doc.data(enclosing) else {
        return;
    };

    for &branch in &group.branches {
        let NodeData::Branch(b) = doc.data(branch) else {
            continue;
        };
        for &interaction in &b.interactions {
            if let NodeData::Message(message) = doc.data(interaction) {
                check_message_endpoints(interaction, message, &diagram.participants, out);
            }
        }
    }
}

/// Flag a message whose sender and receiver resolved to the same
/// participant node.
///
/// This is a style signal, not a structural defect, so it is a warning.
/// Identity is node identity: two participants sharing a name are
/// distinct, and a message between them is not self-referential. Both
/// endpoints must be resolved for the comparison to fire; dangling
/// endpoints are the membership checks' concern.
pub fn check_message(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::Message(message) = doc.data(id) else {
        return;
    };
    if let (Some(sender), Some(receiver)) = (message.sender.target(), message.receiver.target()) {
        if sender == receiver {
            out.emit(
                Diagnostic::warning(id, "message sender and receiver are the same participant")
                    .with_label(doc.span(id), "self-referential message"),
            );
        }
    }
}

fn check_message_endpoints(
    message_id: NodeId,
    message: &Message,
    participants: &[NodeId],
    out: &mut DiagnosticCollector,
) {
    let is_participant = |node: NodeId| participants.contains(&node);
    check_endpoint(
        message_id,
        &message.sender,
        &is_participant,
        "message sender",
        "not a participant of this diagram",
        DiagnosticCode::E201,
        out,
    );
    check_endpoint(
        message_id,
        &message.receiver,
        &is_participant,
        "message receiver",
        "not a participant of this diagram",
        DiagnosticCode::E201,
        out,
    );
}

#[cfg(test)]
mod tests {
    use tetragram_core::ast::{
        Branch, GroupOperator, Message, MessageGroup, MessageKind, Participant, ParticipantKind,
        Reference, SequenceDiagram,
    };
    use tetragram_core::{Document, Id, NodeData, Span, Spanned};

    use super::*;

    fn name(text: &str, start: usize) -> Spanned<Id> {
        Spanned::new(Id::new(text), Span::new(start..start + text.len()))
    }

    fn diagram() -> (Document, NodeId) {
        let mut doc = Document::new();
        let id = doc
            .insert(
                doc.root(),
                Span::new(0..400),
                NodeData::SequenceDiagram(SequenceDiagram::new(name("Checkout", 16))),
            )
            .expect("diagram under model");
        (doc, id)
    }

    fn participant(doc: &mut Document, diagram: NodeId, text: &str, start: usize) -> NodeId {
        doc.insert(
            diagram,
            Span::new(start..start + text.len()),
            NodeData::Participant(Participant {
                name: name(text, start),
                kind: ParticipantKind::System,
            }),
        )
        .expect("participant under diagram")
    }

    fn message(doc: &mut Document, parent: NodeId, sender: Reference, receiver: Reference) -> NodeId {
        doc.insert(
            parent,
            Span::new(200..220),
            NodeData::Message(Message {
                sender,
                receiver,
                kind: MessageKind::OneWay,
                text: None,
            }),
        )
        .expect("message under interaction list")
    }

    fn run(
        doc: &Document,
        id: NodeId,
        check: fn(&Document, NodeId, &mut DiagnosticCollector),
    ) -> Vec<Diagnostic> {
        let mut out = DiagnosticCollector::new();
        check(doc, id, &mut out);
        out.into_diagnostics()
    }

    #[test]
    fn test_duplicate_participants() {
        let (mut doc, diagram_id) = diagram();
        participant(&mut doc, diagram_id, "cart", 30);
        let second = participant(&mut doc, diagram_id, "cart", 50);

        let diagnostics = run(&doc, diagram_id, check_sequence_diagram);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].target(), second);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::E200));
    }

    #[test]
    fn test_direct_message_between_participants_passes() {
        let (mut doc, diagram_id) = diagram();
        let cart = participant(&mut doc, diagram_id, "cart", 30);
        let billing = participant(&mut doc, diagram_id, "billing", 50);
        message(
            &mut doc,
            diagram_id,
            Reference::resolved(name("cart", 200), cart),
            Reference::resolved(name("billing", 210), billing),
        );

        assert!(run(&doc, diagram_id, check_sequence_diagram).is_empty());
    }

    #[test]
    fn test_direct_message_with_dangling_sender() {
        let (mut doc, diagram_id) = diagram();
        let billing = participant(&mut doc, diagram_id, "billing", 50);
        let msg = message(
            &mut doc,
            diagram_id,
            Reference::dangling(name("ghost", 200)),
            Reference::resolved(name("billing", 210), billing),
        );

        let diagnostics = run(&doc, diagram_id, check_sequence_diagram);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].target(), msg);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::E201));
        assert!(diagnostics[0].message().contains("message sender"));
    }

    #[test]
    fn test_message_resolved_into_another_sequence_diagram() {
        let (mut doc, diagram_id) = diagram();
        let cart = participant(&mut doc, diagram_id, "cart", 30);

        let other = doc
            .insert(
                doc.root(),
                Span::new(400..600),
                NodeData::SequenceDiagram(SequenceDiagram::new(name("Refund", 416))),
            )
            .expect("second diagram under model");
        let foreign = participant(&mut doc, other, "billing", 430);

        let msg = message(
            &mut doc,
            diagram_id,
            Reference::resolved(name("cart", 200), cart),
            Reference::resolved(name("billing", 210), foreign),
        );

        let diagnostics = run(&doc, diagram_id, check_sequence_diagram);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].target(), msg);
        assert!(diagnostics[0].message().contains("message receiver"));
    }

    /// Build `depth` levels of group/branch nesting under `diagram_id` and
    /// return the innermost branch and group.
    fn nest_groups(doc: &mut Document, diagram_id: NodeId, depth: usize) -> (NodeId, NodeId) {
        let mut parent = diagram_id;
        let mut innermost_group = diagram_id;
        let mut innermost_branch = diagram_id;
        for _ in 0..depth {
            let group = doc
                .insert(
                    parent,
                    Span::new(100..300),
                    NodeData::MessageGroup(MessageGroup::new(GroupOperator::Alternative)),
                )
                .expect("group");
            let branch = doc
                .insert(
                    group,
                    Span::new(110..290),
                    NodeData::Branch(Branch::new(Some("else".to_string()))),
                )
                .expect("branch");
            innermost_group = group;
            innermost_branch = branch;
            parent = branch;
        }
        (innermost_branch, innermost_group)
    }

    #[test]
    fn test_deeply_nested_message_resolves_to_enclosing_diagram() {
        let (mut doc, diagram_id) = diagram();
        let cart = participant(&mut doc, diagram_id, "cart", 30);
        let billing = participant(&mut doc, diagram_id, "billing", 50);

        let (innermost_branch, innermost_group) = nest_groups(&mut doc, diagram_id, 3);
        message(
            &mut doc,
            innermost_branch,
            Reference::resolved(name("cart", 200), cart),
            Reference::resolved(name("billing", 210), billing),
        );

        assert!(run(&doc, innermost_group, check_message_group).is_empty());
    }

    #[test]
    fn test_grouped_message_with_unknown_receiver() {
        let (mut doc, diagram_id) = diagram();
        let cart = participant(&mut doc, diagram_id, "cart", 30);

        let (innermost_branch, innermost_group) = nest_groups(&mut doc, diagram_id, 2);
        let msg = message(
            &mut doc,
            innermost_branch,
            Reference::resolved(name("cart", 200), cart),
            Reference::dangling(name("ghost", 210)),
        );

        let diagnostics = run(&doc, innermost_group, check_message_group);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].target(), msg);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::E201));
    }

    #[test]
    fn test_outer_group_does_not_recurse_into_nested_groups() {
        let (mut doc, diagram_id) = diagram();
        let cart = participant(&mut doc, diagram_id, "cart", 30);

        let outer_group = doc
            .insert(
                diagram_id,
                Span::new(100..300),
                NodeData::MessageGroup(MessageGroup::new(GroupOperator::Parallel)),
            )
            .expect("outer group");
        let outer_branch = doc
            .insert(
                outer_group,
                Span::new(110..290),
                NodeData::Branch(Branch::new(None)),
            )
            .expect("outer branch");
        let inner_group = doc
            .insert(
                outer_branch,
                Span::new(120..280),
                NodeData::MessageGroup(MessageGroup::new(GroupOperator::Optional)),
            )
            .expect("inner group");
        let inner_branch = doc
            .insert(
                inner_group,
                Span::new(130..270),
                NodeData::Branch(Branch::new(None)),
            )
            .expect("inner branch");
        message(
            &mut doc,
            inner_branch,
            Reference::resolved(name("cart", 200), cart),
            Reference::dangling(name("ghost", 210)),
        );

        // The bad message belongs to the inner group's dispatch.
        assert!(run(&doc, outer_group, check_message_group).is_empty());
        assert_eq!(run(&doc, inner_group, check_message_group).len(), 1);
    }

    #[test]
    fn test_self_message_warns() {
        let (mut doc, diagram_id) = diagram();
        let cart = participant(&mut doc, diagram_id, "cart", 30);
        let msg = message(
            &mut doc,
            diagram_id,
            Reference::resolved(name("cart", 200), cart),
            Reference::resolved(name("cart", 210), cart),
        );

        let diagnostics = run(&doc, msg, check_message);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity().is_warning());
        assert!(diagnostics[0].code().is_none());
        assert_eq!(diagnostics[0].target(), msg);
    }

    #[test]
    fn test_same_name_different_nodes_is_not_a_self_message() {
        let (mut doc, diagram_id) = diagram();
        // Two distinct participants that happen to share a name; the
        // diagram checker reports the duplicate, not the message checker.
        let first = participant(&mut doc, diagram_id, "cart", 30);
        let second = participant(&mut doc, diagram_id, "cart", 50);
        let msg = message(
            &mut doc,
            diagram_id,
            Reference::resolved(name("cart", 200), first),
            Reference::resolved(name("cart", 210), second),
        );

        assert!(run(&doc, msg, check_message).is_empty());
    }

    #[test]
    fn test_dangling_endpoints_do_not_warn() {
        let (mut doc, diagram_id) = diagram();
        let msg = message(
            &mut doc,
            diagram_id,
            Reference::dangling(name("ghost", 200)),
            Reference::dangling(name("ghost", 210)),
        );

        assert!(run(&doc, msg, check_message).is_empty());
    }
}
