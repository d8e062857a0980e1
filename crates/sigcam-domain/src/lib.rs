//! Sigcam Domain Layer
//!
//! The statement-resolution engine that turns pairwise causal interaction
//! records into an activity graph. It has no I/O: reference tables come in
//! already loaded, and output goes through the [`GraphEmitter`] trait.
//!
//! ## Key Concepts
//!
//! - **Entity**: a protein, microRNA, small molecule, complex or family
//! - **Mechanism**: the molecular activity of a statement, mapped to an ontology term
//! - **Causal Statement**: entity A, through a mechanism, regulates entity B
//! - **Statement Set**: one batch of statements; dedup, precedence, chaining
//! - **Intermediary Process**: a process node placed between two activities
//!
//! ## Flow
//!
//! resolve entities → map mechanism → classify relation → add to set →
//! apply precedence → chain through an emitter

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod entity;
pub mod error;
pub mod evidence;
pub mod grouping;
pub mod intermediary;
pub mod mechanism;
pub mod node;
pub mod relation;
pub mod resolver;
pub mod statement;
pub mod statement_set;
pub mod terms;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use chain::ChainReport;
pub use entity::{Entity, EntityKind, Grouping};
pub use error::{ChainError, GroupingError, MappingError, ResolveError};
pub use evidence::Evidence;
pub use grouping::{GroupingKind, GroupingTable, ReferenceData};
pub use intermediary::{IntermediaryRule, IntermediaryRules, RuleRelation};
pub use mechanism::{Mechanism, MechanismEntry, MechanismMapper};
pub use node::{NodeCache, NodeKey};
pub use relation::{classify, Effect, Relation};
pub use resolver::{EntityRegistry, IdentityResolver};
pub use statement::CausalStatement;
pub use statement_set::{AddOutcome, StatementSet};
pub use traits::{GraphEmitter, NodeDecl};
