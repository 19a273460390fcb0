//! Upward scope resolution over document parent links.
//!
//! Nested constructs (a message inside a branch of a group, a flow inside
//! an activity diagram) validate their references against the symbol set
//! of the diagram that ultimately owns them, not against their immediate
//! parent. This module finds that diagram by walking parent links strictly
//! upward, never sideways.
//!
//! A walk that reaches the root without a match returns `None`. The
//! callers treat that as "nothing to check": a node detached from any
//! diagram of the required kind is a producer defect the validator does
//! not report on.

use log::trace;
use tetragram_core::{Document, NodeId, NodeKind};

/// Find the nearest ancestor of `node` whose kind satisfies `predicate`.
///
/// The walk starts from the node's parent, so a node never matches
/// itself. O(depth of the node).
///
/// # Example
///
/// ```
/// # use tetragram::scope::find_enclosing;
/// # use tetragram_core::ast::{Document, NodeData, NodeKind, SequenceDiagram, MessageGroup, GroupOperator, Branch};
/// # use tetragram_core::{Id, Span, Spanned};
/// let mut doc = Document::new();
/// let diagram = doc
///     .insert(
///         doc.root(),
///         Span::default(),
///         NodeData::SequenceDiagram(SequenceDiagram::new(Spanned::new(
///             Id::new("Checkout"),
///             Span::default(),
///         ))),
///     )
///     .unwrap();
/// let group = doc
///     .insert(
///         diagram,
///         Span::default(),
///         NodeData::MessageGroup(MessageGroup::new(GroupOperator::Alternative)),
///     )
///     .unwrap();
/// let branch = doc
///     .insert(group, Span::default(), NodeData::Branch(Branch::new(None)))
///     .unwrap();
///
/// let found = find_enclosing(&doc, branch, |kind| kind == NodeKind::SequenceDiagram);
/// assert_eq!(found, Some(diagram));
/// ```
pub fn find_enclosing(
    doc: &Document,
    node: NodeId,
    predicate: impl Fn(NodeKind) -> bool,
) -> Option<NodeId> {
    let mut current = doc.parent(node);
    while let Some(id) = current {
        if predicate(doc.kind(id)) {
            trace!(node:% = node, scope:% = id; "resolved enclosing scope");
            return Some(id);
        }
        current = doc.parent(id);
    }
    trace!(node:% = node; "no enclosing scope of the requested kind");
    None
}

/// The nearest enclosing sequence diagram, if any.
pub fn enclosing_sequence_diagram(doc: &Document, node: NodeId) -> Option<NodeId> {
    find_enclosing(doc, node, |kind| kind == NodeKind::SequenceDiagram)
}

/// The nearest enclosing activity diagram, if any.
pub fn enclosing_activity_diagram(doc: &Document, node: NodeId) -> Option<NodeId> {
    find_enclosing(doc, node, |kind| kind == NodeKind::ActivityDiagram)
}
