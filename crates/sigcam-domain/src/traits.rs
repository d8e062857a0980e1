//! Trait definitions for external interactions
//!
//! The engine decides which nodes and edges must exist; a [`GraphEmitter`]
//! realizes them. Implementations live in other crates (sigcam-store).

use crate::evidence::Evidence;

/// A node the engine wants to exist in the output graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeDecl {
    /// Canonical key; declaring the same key twice yields the same node
    pub key: String,

    /// Ontology class the node is an instance of
    pub class: String,

    /// Optional human readable label
    pub label: Option<String>,
}

impl NodeDecl {
    /// Create a declaration without a label
    pub fn new(key: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            class: class.into(),
            label: None,
        }
    }

    /// Attach a label to the declaration
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Trait for materializing nodes, edges and provenance
///
/// Implemented by the infrastructure layer (sigcam-store)
pub trait GraphEmitter {
    /// Handle to a declared node
    type Node: Clone;

    /// Handle to an emitted edge
    type Edge: Clone;

    /// Error type for emitter operations
    type Error;

    /// Declare a node; an already declared key is success and returns the existing node
    fn declare_node(&mut self, decl: &NodeDecl) -> Result<Self::Node, Self::Error>;

    /// Emit a labeled edge
    fn emit_edge(
        &mut self,
        subject: &Self::Node,
        predicate: &str,
        object: &Self::Node,
    ) -> Result<Self::Edge, Self::Error>;

    /// Attach provenance to an edge
    fn attach_evidence(&mut self, edge: &Self::Edge, evidence: &Evidence) -> Result<(), Self::Error>;

    /// Look up an existing edge
    fn find_existing_edge(
        &self,
        subject: &Self::Node,
        predicate: &str,
        object: &Self::Node,
    ) -> Result<Option<Self::Edge>, Self::Error>;

    /// Reuse an existing edge or emit a new one
    ///
    /// The boolean is true when the edge was newly emitted.
    fn ensure_edge(
        &mut self,
        subject: &Self::Node,
        predicate: &str,
        object: &Self::Node,
    ) -> Result<(Self::Edge, bool), Self::Error> {
        match self.find_existing_edge(subject, predicate, object)? {
            Some(edge) => Ok((edge, false)),
            None => Ok((self.emit_edge(subject, predicate, object)?, true)),
        }
    }
}
