//! The document tree for tetragram diagrams.
//!
//! A [`Document`] is an id-indexed arena holding every node of one parsed
//! diagram document. The root is always a [`Model`] node; a model owns an
//! ordered list of diagrams of the four kinds (use-case, sequence, class,
//! activity), and every other node is owned by exactly one parent further
//! up the tree.
//!
//! Cross-references between elements ([`Reference`]) are non-owning: the
//! upstream producer resolves each written name either to a [`NodeId`]
//! somewhere in the same tree or leaves it dangling. Which targets are
//! *legal* for a given reference is a semantic question and is not encoded
//! here.
//!
//! Node identity is [`NodeId`] equality. Two distinct nodes that happen to
//! share a name are different elements.

use log::trace;
use serde::Serialize;
use thiserror::Error;

use crate::{
    identifier::Id,
    span::{Span, Spanned},
};

/// Index of a node within its [`Document`].
///
/// Ids are only meaningful for the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the document arena.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of node kinds appearing in a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Model,
    UseCaseDiagram,
    Actor,
    Rectangle,
    UseCase,
    Relation,
    SequenceDiagram,
    Participant,
    Message,
    Execution,
    MessageGroup,
    Branch,
    ClassDiagram,
    ClassDefinition,
    Attribute,
    Method,
    Relationship,
    ActivityDiagram,
    Activity,
    Task,
    Flow,
    DataFlow,
    CountRange,
}

impl NodeKind {
    /// Kinds that may appear in a sequence diagram's (or branch's)
    /// interaction list.
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            NodeKind::Message | NodeKind::Execution | NodeKind::MessageGroup
        )
    }

    /// The four diagram kinds a model may contain.
    pub fn is_diagram(&self) -> bool {
        matches!(
            self,
            NodeKind::UseCaseDiagram
                | NodeKind::SequenceDiagram
                | NodeKind::ClassDiagram
                | NodeKind::ActivityDiagram
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Model => "model",
            NodeKind::UseCaseDiagram => "use-case diagram",
            NodeKind::Actor => "actor",
            NodeKind::Rectangle => "rectangle",
            NodeKind::UseCase => "use case",
            NodeKind::Relation => "relation",
            NodeKind::SequenceDiagram => "sequence diagram",
            NodeKind::Participant => "participant",
            NodeKind::Message => "message",
            NodeKind::Execution => "execution",
            NodeKind::MessageGroup => "message group",
            NodeKind::Branch => "branch",
            NodeKind::ClassDiagram => "class diagram",
            NodeKind::ClassDefinition => "class definition",
            NodeKind::Attribute => "attribute",
            NodeKind::Method => "method",
            NodeKind::Relationship => "relationship",
            NodeKind::ActivityDiagram => "activity diagram",
            NodeKind::Activity => "activity",
            NodeKind::Task => "task",
            NodeKind::Flow => "flow",
            NodeKind::DataFlow => "data flow",
            NodeKind::CountRange => "count range",
        };
        write!(f, "{}", name)
    }
}

/// A non-owning cross-reference to another element of the same tree.
///
/// The producer records the name as written in the source and, when the
/// name resolved, the target node. A reference with no target is dangling.
#[derive(Debug, Clone)]
pub struct Reference {
    name: Spanned<Id>,
    target: Option<NodeId>,
}

impl Reference {
    /// A reference whose name was resolved to a node of the same tree.
    pub fn resolved(name: Spanned<Id>, target: NodeId) -> Self {
        Self {
            name,
            target: Some(target),
        }
    }

    /// A reference the producer could not resolve.
    pub fn dangling(name: Spanned<Id>) -> Self {
        Self { name, target: None }
    }

    /// The name as written in the source.
    pub fn name(&self) -> Id {
        *self.name.inner()
    }

    /// The source span of the written name.
    pub fn span(&self) -> Span {
        self.name.span()
    }

    /// The resolved target, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn is_dangling(&self) -> bool {
        self.target.is_none()
    }
}

/// Connection kinds between use-case diagram elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationKind {
    /// A plain `connects` association.
    Normal,
    /// An `extends` connection between use cases.
    Extension,
    /// An `includes` connection between use cases.
    Inclusion,
}

/// Optional rendering hint on a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrowDirection {
    Upward,
    Downward,
    Leftward,
    Rightward,
}

/// The role a sequence-diagram lifeline plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticipantKind {
    Person,
    System,
    Object,
    Database,
    Queue,
    Controller,
    Interface,
}

/// Message arrow kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    RequestResponse,
    OneWay,
    Reply,
    Lost,
    Found,
}

/// Whether an execution statement opens or closes an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExecutionMarker {
    Start,
    End,
}

/// Combined-fragment operators for grouped interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupOperator {
    Alternative,
    Optional,
    Parallel,
    Repeat,
}

/// Connection kinds between classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationshipKind {
    Inherits,
    Owns,
    Contains,
}

/// The document body: an ordered list of diagrams.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub diagrams: Vec<NodeId>,
}

/// A use-case diagram with its declared elements and relations.
#[derive(Debug, Clone)]
pub struct UseCaseDiagram {
    pub name: Spanned<Id>,
    pub actors: Vec<NodeId>,
    pub rectangles: Vec<NodeId>,
    pub use_cases: Vec<NodeId>,
    pub relations: Vec<NodeId>,
}

impl UseCaseDiagram {
    pub fn new(name: Spanned<Id>) -> Self {
        Self {
            name,
            actors: Vec::new(),
            rectangles: Vec::new(),
            use_cases: Vec::new(),
            relations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub name: Spanned<Id>,
}

/// A system-boundary rectangle grouping use cases.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub name: Spanned<Id>,
}

#[derive(Debug, Clone)]
pub struct UseCase {
    pub name: Spanned<Id>,
    pub description: Option<String>,
    pub extension_points: Vec<String>,
}

/// A connection between two use-case diagram elements.
///
/// Valid targets are the actors, use cases, and rectangles declared by the
/// same diagram; the producer may nevertheless resolve a name into another
/// diagram, which is what semantic validation rejects.
#[derive(Debug, Clone)]
pub struct Relation {
    pub from: Reference,
    pub to: Reference,
    pub kind: RelationKind,
    pub direction: Option<ArrowDirection>,
    pub length: Option<u32>,
}

/// A sequence diagram: lifelines plus an ordered interaction list.
#[derive(Debug, Clone)]
pub struct SequenceDiagram {
    pub name: Spanned<Id>,
    pub participants: Vec<NodeId>,
    pub interactions: Vec<NodeId>,
}

impl SequenceDiagram {
    pub fn new(name: Spanned<Id>) -> Self {
        Self {
            name,
            participants: Vec::new(),
            interactions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub name: Spanned<Id>,
    pub kind: ParticipantKind,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub sender: Reference,
    pub receiver: Reference,
    pub kind: MessageKind,
    pub text: Option<String>,
}

/// An explicit activation start/end on a lifeline.
#[derive(Debug, Clone)]
pub struct Execution {
    pub lifeline: Reference,
    pub marker: ExecutionMarker,
}

/// A combined fragment; its branches nest interactions recursively.
#[derive(Debug, Clone)]
pub struct MessageGroup {
    pub operator: GroupOperator,
    pub branches: Vec<NodeId>,
}

impl MessageGroup {
    pub fn new(operator: GroupOperator) -> Self {
        Self {
            operator,
            branches: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Branch {
    pub label: Option<String>,
    pub interactions: Vec<NodeId>,
}

impl Branch {
    pub fn new(label: Option<String>) -> Self {
        Self {
            label,
            interactions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassDiagram {
    pub name: Spanned<Id>,
    pub classes: Vec<NodeId>,
    pub relationships: Vec<NodeId>,
}

impl ClassDiagram {
    pub fn new(name: Spanned<Id>) -> Self {
        Self {
            name,
            classes: Vec::new(),
            relationships: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassDefinition {
    pub name: Spanned<Id>,
    pub attributes: Vec<NodeId>,
    pub methods: Vec<NodeId>,
}

impl ClassDefinition {
    pub fn new(name: Spanned<Id>) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: Spanned<Id>,
    pub type_name: Option<Id>,
}

/// A method parameter. Parameters are plain data, not tree nodes.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Id,
    pub type_name: Option<Id>,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: Spanned<Id>,
    pub parameters: Vec<Parameter>,
}

/// A connection between two classes of the same diagram.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub from_class: Reference,
    pub to_class: Reference,
    pub kind: RelationshipKind,
}

/// An activity diagram: activities plus an ordered edge list mixing
/// control flows and data flows.
#[derive(Debug, Clone)]
pub struct ActivityDiagram {
    pub name: Spanned<Id>,
    pub activities: Vec<NodeId>,
    pub edges: Vec<NodeId>,
}

impl ActivityDiagram {
    pub fn new(name: Spanned<Id>) -> Self {
        Self {
            name,
            activities: Vec::new(),
            edges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Activity {
    pub name: Spanned<Id>,
    pub tasks: Vec<NodeId>,
}

impl Activity {
    pub fn new(name: Spanned<Id>) -> Self {
        Self {
            name,
            tasks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub name: Spanned<Id>,
}

/// A control-flow edge between two tasks.
#[derive(Debug, Clone)]
pub struct Flow {
    pub source: Reference,
    pub target: Reference,
    pub count: Option<NodeId>,
}

impl Flow {
    pub fn new(source: Reference, target: Reference) -> Self {
        Self {
            source,
            target,
            count: None,
        }
    }
}

/// A data-flow edge between two tasks.
#[derive(Debug, Clone)]
pub struct DataFlow {
    pub source: Reference,
    pub target: Reference,
    pub count: Option<NodeId>,
}

impl DataFlow {
    pub fn new(source: Reference, target: Reference) -> Self {
        Self {
            source,
            target,
            count: None,
        }
    }
}

/// Repetition bounds on a flow, as written in the source.
///
/// Bounds are kept as literals; interpreting them is the validator's job.
/// An absent maximum means unbounded (`..*`).
#[derive(Debug, Clone)]
pub struct CountRange {
    pub minimum: String,
    pub maximum: Option<String>,
}

/// The typed payload of a tree node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Model(Model),
    UseCaseDiagram(UseCaseDiagram),
    Actor(Actor),
    Rectangle(Rectangle),
    UseCase(UseCase),
    Relation(Relation),
    SequenceDiagram(SequenceDiagram),
    Participant(Participant),
    Message(Message),
    Execution(Execution),
    MessageGroup(MessageGroup),
    Branch(Branch),
    ClassDiagram(ClassDiagram),
    ClassDefinition(ClassDefinition),
    Attribute(Attribute),
    Method(Method),
    Relationship(Relationship),
    ActivityDiagram(ActivityDiagram),
    Activity(Activity),
    Task(Task),
    Flow(Flow),
    DataFlow(DataFlow),
    CountRange(CountRange),
}

impl NodeData {
    /// The kind tag for this payload.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Model(_) => NodeKind::Model,
            NodeData::UseCaseDiagram(_) => NodeKind::UseCaseDiagram,
            NodeData::Actor(_) => NodeKind::Actor,
            NodeData::Rectangle(_) => NodeKind::Rectangle,
            NodeData::UseCase(_) => NodeKind::UseCase,
            NodeData::Relation(_) => NodeKind::Relation,
            NodeData::SequenceDiagram(_) => NodeKind::SequenceDiagram,
            NodeData::Participant(_) => NodeKind::Participant,
            NodeData::Message(_) => NodeKind::Message,
            NodeData::Execution(_) => NodeKind::Execution,
            NodeData::MessageGroup(_) => NodeKind::MessageGroup,
            NodeData::Branch(_) => NodeKind::Branch,
            NodeData::ClassDiagram(_) => NodeKind::ClassDiagram,
            NodeData::ClassDefinition(_) => NodeKind::ClassDefinition,
            NodeData::Attribute(_) => NodeKind::Attribute,
            NodeData::Method(_) => NodeKind::Method,
            NodeData::Relationship(_) => NodeKind::Relationship,
            NodeData::ActivityDiagram(_) => NodeKind::ActivityDiagram,
            NodeData::Activity(_) => NodeKind::Activity,
            NodeData::Task(_) => NodeKind::Task,
            NodeData::Flow(_) => NodeKind::Flow,
            NodeData::DataFlow(_) => NodeKind::DataFlow,
            NodeData::CountRange(_) => NodeKind::CountRange,
        }
    }

    /// The declared name of this node, for the kinds that carry one.
    pub fn name(&self) -> Option<Id> {
        self.name_spanned().map(|name| *name.inner())
    }

    /// The declared name together with its source span.
    pub fn name_spanned(&self) -> Option<&Spanned<Id>> {
        let name = match self {
            NodeData::UseCaseDiagram(d) => &d.name,
            NodeData::Actor(a) => &a.name,
            NodeData::Rectangle(r) => &r.name,
            NodeData::UseCase(u) => &u.name,
            NodeData::SequenceDiagram(d) => &d.name,
            NodeData::Participant(p) => &p.name,
            NodeData::ClassDiagram(d) => &d.name,
            NodeData::ClassDefinition(c) => &c.name,
            NodeData::Attribute(a) => &a.name,
            NodeData::Method(m) => &m.name,
            NodeData::ActivityDiagram(d) => &d.name,
            NodeData::Activity(a) => &a.name,
            NodeData::Task(t) => &t.name,
            _ => return None,
        };
        Some(name)
    }
}

/// One node of the tree: payload, parent link, and source span.
#[derive(Debug, Clone)]
pub struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    span: Span,
}

impl Node {
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// The owning node; `None` only for the root model.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// Error raised when a node is inserted under a parent that cannot
/// contain it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("a {child} node cannot be contained in a {parent} node")]
    InvalidChild { parent: NodeKind, child: NodeKind },
}

/// An id-indexed arena holding one diagram document.
///
/// Nodes are appended in document order and never removed; parent links
/// and the parent's child collections are maintained by [`Document::insert`],
/// so a well-formed tree cannot be built with inconsistent containment.
///
/// # Example
///
/// ```
/// use tetragram_core::ast::{Document, NodeData, ParticipantKind, Participant, SequenceDiagram};
/// use tetragram_core::identifier::Id;
/// use tetragram_core::span::{Span, Spanned};
///
/// let mut doc = Document::new();
/// let diagram = doc
///     .insert(
///         doc.root(),
///         Span::new(0..80),
///         NodeData::SequenceDiagram(SequenceDiagram::new(Spanned::new(
///             Id::new("Checkout"),
///             Span::new(16..24),
///         ))),
///     )
///     .unwrap();
/// let cart = doc
///     .insert(
///         diagram,
///         Span::new(30..50),
///         NodeData::Participant(Participant {
///             name: Spanned::new(Id::new("cart"), Span::new(30..34)),
///             kind: ParticipantKind::System,
///         }),
///     )
///     .unwrap();
///
/// assert_eq!(doc.parent(cart), Some(diagram));
/// assert_eq!(doc.name(cart), Some(Id::new("cart")));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document containing only the root model node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Model(Model::default()),
                parent: None,
                span: Span::default(),
            }],
        }
    }

    /// The root model node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a node under `parent`, attaching it to the parent's matching
    /// child collection.
    ///
    /// Returns [`TreeError::InvalidChild`] when the parent kind cannot
    /// contain the child kind. A count range inserted under a flow that
    /// already carries one supersedes the earlier range.
    pub fn insert(
        &mut self,
        parent: NodeId,
        span: Span,
        data: NodeData,
    ) -> Result<NodeId, TreeError> {
        let child_kind = data.kind();
        let parent_kind = self.nodes[parent.index()].kind();
        let id = NodeId(self.nodes.len() as u32);

        let invalid = TreeError::InvalidChild {
            parent: parent_kind,
            child: child_kind,
        };

        match &mut self.nodes[parent.index()].data {
            NodeData::Model(m) if child_kind.is_diagram() => m.diagrams.push(id),
            NodeData::UseCaseDiagram(d) => match child_kind {
                NodeKind::Actor => d.actors.push(id),
                NodeKind::Rectangle => d.rectangles.push(id),
                NodeKind::UseCase => d.use_cases.push(id),
                NodeKind::Relation => d.relations.push(id),
                _ => return Err(invalid),
            },
            NodeData::SequenceDiagram(d) => match child_kind {
                NodeKind::Participant => d.participants.push(id),
                kind if kind.is_interaction() => d.interactions.push(id),
                _ => return Err(invalid),
            },
            NodeData::MessageGroup(g) if child_kind == NodeKind::Branch => g.branches.push(id),
            NodeData::Branch(b) if child_kind.is_interaction() => b.interactions.push(id),
            NodeData::ClassDiagram(d) => match child_kind {
                NodeKind::ClassDefinition => d.classes.push(id),
                NodeKind::Relationship => d.relationships.push(id),
                _ => return Err(invalid),
            },
            NodeData::ClassDefinition(c) => match child_kind {
                NodeKind::Attribute => c.attributes.push(id),
                NodeKind::Method => c.methods.push(id),
                _ => return Err(invalid),
            },
            NodeData::ActivityDiagram(d) => match child_kind {
                NodeKind::Activity => d.activities.push(id),
                NodeKind::Flow | NodeKind::DataFlow => d.edges.push(id),
                _ => return Err(invalid),
            },
            NodeData::Activity(a) if child_kind == NodeKind::Task => a.tasks.push(id),
            NodeData::Flow(f) if child_kind == NodeKind::CountRange => f.count = Some(id),
            NodeData::DataFlow(f) if child_kind == NodeKind::CountRange => f.count = Some(id),
            _ => return Err(invalid),
        }

        trace!(id:% = id, kind:% = child_kind, parent:% = parent; "inserted node");
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            span,
        });
        Ok(id)
    }

    /// The node addressed by `id`.
    ///
    /// # Panics
    ///
    /// Panics when `id` was produced by a different document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        self.node(id).data()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span()
    }

    /// The declared name of `id`, for node kinds that carry one.
    pub fn name(&self, id: NodeId) -> Option<Id> {
        self.data(id).name()
    }

    /// The source span of the declared name of `id`, falling back to the
    /// node span for unnamed kinds.
    pub fn name_span(&self, id: NodeId) -> Span {
        self.data(id)
            .name_spanned()
            .map(|name| name.span())
            .unwrap_or_else(|| self.span(id))
    }

    /// All node ids in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod construction_properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn inserted_actors_keep_declaration_order(names in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
            let mut doc = Document::new();
            let diagram = doc
                .insert(
                    doc.root(),
                    Span::default(),
                    NodeData::UseCaseDiagram(UseCaseDiagram::new(Spanned::new(
                        Id::new("Shop"),
                        Span::default(),
                    ))),
                )
                .expect("diagram under model");

            let mut inserted = Vec::new();
            for text in &names {
                let actor = doc
                    .insert(
                        diagram,
                        Span::default(),
                        NodeData::Actor(Actor {
                            name: Spanned::new(Id::new(text), Span::default()),
                        }),
                    )
                    .expect("actor under diagram");
                inserted.push(actor);
            }

            let NodeData::UseCaseDiagram(d) = doc.data(diagram) else {
                panic!("expected use-case diagram payload");
            };
            prop_assert_eq!(&d.actors, &inserted);
            for (actor, text) in inserted.iter().zip(&names) {
                prop_assert_eq!(doc.parent(*actor), Some(diagram));
                prop_assert_eq!(doc.name(*actor), Some(Id::new(text)));
            }
        }
    }
}
