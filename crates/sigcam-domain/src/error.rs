//! Error types for the domain layer

use thiserror::Error;

/// Errors raised while turning a raw record identifier into an [`Entity`](crate::Entity)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The id looks like a complex but the complex table has no such row
    #[error("Unknown complex: {0}")]
    UnknownComplex(String),

    /// The id looks like a protein family but the family table has no such row
    #[error("Unknown protein family: {0}")]
    UnknownFamily(String),

    /// A protein family named as a statement endpoint; families only group members
    #[error("Protein family cannot be a statement endpoint: {0}")]
    FamilyEndpoint(String),

    /// The declared entity type is not one the engine can represent
    #[error("Unsupported entity type '{declared}' for {id}")]
    UnsupportedType {
        /// Raw identifier from the record
        id: String,
        /// Declared type label from the record
        declared: String,
    },
}

impl ResolveError {
    /// True for the recoverable "grouping not in reference table" failures
    pub fn is_unresolved_grouping(&self) -> bool {
        matches!(
            self,
            ResolveError::UnknownComplex(_) | ResolveError::UnknownFamily(_)
        )
    }
}

/// Errors raised while loading complex or family reference tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    /// Two rows share the same grouping id
    #[error("Duplicate grouping id: {0}")]
    DuplicateId(String),

    /// A row has an empty grouping id
    #[error("Empty grouping id")]
    EmptyId,
}

/// Errors raised while building the mechanism mapping table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Two rows map the same mechanism label
    #[error("Duplicate mechanism label: {0}")]
    DuplicateLabel(String),
}

/// Errors raised while chaining statements into a graph
#[derive(Error, Debug)]
pub enum ChainError<E> {
    /// The graph emitter failed
    #[error("Graph emitter error: {0}")]
    Emitter(E),

    /// A node expected from the upstream pass was never declared
    #[error("Node was not declared before use: {0}")]
    MissingNode(String),
}
