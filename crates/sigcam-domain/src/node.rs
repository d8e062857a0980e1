//! Batch-scoped node handle cache
//!
//! Every node the engine declares goes through a [`NodeCache`] keyed by a
//! canonical [`NodeKey`], so a handle is never declared twice in one batch and
//! no statement holds a stale handle of its own.

use std::collections::HashMap;
use std::fmt;

use crate::traits::{GraphEmitter, NodeDecl};

/// Canonical identity of a node in the output graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// A resolved entity, keyed by its full id
    Entity(String),

    /// An activity: an entity performing a mechanism
    Activity {
        /// Full id of the enabling entity
        entity: String,
        /// Mechanism ontology term
        term: String,
    },

    /// A member of a complex or family, scoped to that grouping
    Member {
        /// Grouping id
        grouping: String,
        /// Full id of the member
        member: String,
    },

    /// An intermediary process placed between two activities
    Process {
        /// Process ontology term
        term: String,
        /// Key of the regulating activity
        from: String,
        /// Key of the regulated activity
        to: String,
    },
}

impl NodeKey {
    /// Activity key for `entity` performing `term`
    pub fn activity(entity: impl Into<String>, term: impl Into<String>) -> Self {
        NodeKey::Activity {
            entity: entity.into(),
            term: term.into(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Entity(id) => write!(f, "{}", id),
            NodeKey::Activity { entity, term } => write!(f, "{}/{}", entity, term),
            NodeKey::Member { grouping, member } => write!(f, "{}#{}", grouping, member),
            NodeKey::Process { term, from, to } => write!(f, "{}@{}->{}", term, from, to),
        }
    }
}

/// Node handles declared so far in one batch
#[derive(Debug)]
pub struct NodeCache<N> {
    nodes: HashMap<NodeKey, N>,
}

impl<N: Clone> NodeCache<N> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Handle for `key`, if it was declared
    pub fn get(&self, key: &NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    /// Number of cached nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node has been declared
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the cached handle or declare the node through `emitter`
    ///
    /// The boolean is true when the node was declared by this call.
    pub fn get_or_declare<E>(
        &mut self,
        emitter: &mut E,
        key: NodeKey,
        class: &str,
        label: Option<&str>,
    ) -> Result<(N, bool), E::Error>
    where
        E: GraphEmitter<Node = N>,
    {
        if let Some(node) = self.nodes.get(&key) {
            return Ok((node.clone(), false));
        }

        let mut decl = NodeDecl::new(key.to_string(), class);
        if let Some(label) = label {
            decl = decl.with_label(label);
        }
        let node = emitter.declare_node(&decl)?;
        self.nodes.insert(key, node.clone());
        Ok((node, true))
    }
}

impl<N: Clone> Default for NodeCache<N> {
    fn default() -> Self {
        Self::new()
    }
}
