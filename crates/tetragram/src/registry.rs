//! The dispatch table from node kinds to their checks.
//!
//! The registry is the only component that knows which check applies to
//! which node kind. It is built once, read-only afterwards, and queried by
//! the driver for every node of a pass. Registration replaces: installing
//! a checker set for a kind discards whatever was registered for that kind
//! before.

use std::sync::OnceLock;

use indexmap::IndexMap;
use tetragram_core::{Document, NodeId, NodeKind};

use crate::{checks, error::DiagnosticCollector};

/// A single validation check: a pure function of one node, reporting into
/// the shared sink. Checks never mutate the document and never abort the
/// pass.
pub type Checker = fn(&Document, NodeId, &mut DiagnosticCollector);

/// A fixed mapping from node kind to the checks that apply to it.
///
/// [`ValidationRegistry::default`] installs the full check set; start from
/// [`ValidationRegistry::empty`] to assemble a custom one.
///
/// # Example
///
/// ```
/// # use tetragram::registry::ValidationRegistry;
/// # use tetragram_core::NodeKind;
/// let registry = ValidationRegistry::default();
/// assert_eq!(registry.checkers(NodeKind::Message).len(), 1);
/// assert!(registry.checkers(NodeKind::Actor).is_empty());
/// ```
#[derive(Debug)]
pub struct ValidationRegistry {
    checks: IndexMap<NodeKind, Vec<Checker>>,
}

impl ValidationRegistry {
    /// A registry with no checks installed.
    pub fn empty() -> Self {
        Self {
            checks: IndexMap::new(),
        }
    }

    /// Install the checker set for `kind`, replacing any previous set.
    pub fn register(&mut self, kind: NodeKind, checkers: Vec<Checker>) {
        self.checks.insert(kind, checkers);
    }

    /// The checks registered for `kind`, in registration order.
    pub fn checkers(&self, kind: NodeKind) -> &[Checker] {
        self.checks.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The kinds with at least one registered check, in registration order.
    pub fn registered_kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.checks
            .iter()
            .filter(|(_, checkers)| !checkers.is_empty())
            .map(|(kind, _)| *kind)
    }
}

impl Default for ValidationRegistry {
    /// The full check set, one entry per validated node kind.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            NodeKind::UseCaseDiagram,
            vec![checks::check_use_case_diagram],
        );
        registry.register(
            NodeKind::SequenceDiagram,
            vec![checks::check_sequence_diagram],
        );
        registry.register(NodeKind::ClassDiagram, vec![checks::check_class_diagram]);
        registry.register(
            NodeKind::ActivityDiagram,
            vec![checks::check_activity_diagram],
        );
        registry.register(NodeKind::MessageGroup, vec![checks::check_message_group]);
        registry.register(
            NodeKind::ClassDefinition,
            vec![checks::check_class_definition],
        );
        registry.register(NodeKind::Flow, vec![checks::check_flow]);
        registry.register(NodeKind::DataFlow, vec![checks::check_data_flow]);
        registry.register(NodeKind::Message, vec![checks::check_message]);
        registry
    }
}

static DEFAULT_REGISTRY: OnceLock<ValidationRegistry> = OnceLock::new();

/// The shared default registry, built on first use and reused for every
/// pass.
pub fn default_registry() -> &'static ValidationRegistry {
    DEFAULT_REGISTRY.get_or_init(ValidationRegistry::default)
}
