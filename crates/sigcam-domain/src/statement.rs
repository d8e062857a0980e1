//! Causal statement - the atomic unit of the activity graph

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::entity::Entity;
use crate::evidence::Evidence;
use crate::mechanism::Mechanism;
use crate::relation::{classify, Effect, Relation};

/// Entity A, through a mechanism, affects entity B
///
/// The relation is derived from effect, directness and mechanism at
/// construction and cannot be set any other way.
#[derive(Debug, Clone)]
pub struct CausalStatement {
    entity_a: Arc<Entity>,
    entity_b: Arc<Entity>,
    mechanism: Mechanism,
    effect: Effect,
    direct: bool,
    relation: Option<Relation>,
    references: BTreeSet<String>,
    annotator: Option<String>,
    date: Option<String>,
    linenum: usize,
    regulated_activity_term: Option<String>,
}

impl CausalStatement {
    /// Create a statement and classify its relation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entity_a: Arc<Entity>,
        entity_b: Arc<Entity>,
        mechanism: Mechanism,
        effect: Effect,
        direct: bool,
        references: impl IntoIterator<Item = String>,
        annotator: Option<String>,
        date: Option<String>,
        linenum: usize,
    ) -> Self {
        let mut statement = Self {
            entity_a,
            entity_b,
            mechanism,
            effect,
            direct,
            relation: None,
            references: references.into_iter().filter(|r| !r.is_empty()).collect(),
            annotator,
            date,
            linenum,
            regulated_activity_term: None,
        };
        statement.recompute_relation();
        statement
    }

    /// Re-derive the relation; always yields the same value
    pub fn recompute_relation(&mut self) -> Option<Relation> {
        self.relation = classify(self.effect, self.direct, self.mechanism.is_root());
        self.relation
    }

    /// Regulating entity
    pub fn entity_a(&self) -> &Arc<Entity> {
        &self.entity_a
    }

    /// Regulated entity
    pub fn entity_b(&self) -> &Arc<Entity> {
        &self.entity_b
    }

    /// Mechanism performed by entity A
    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    /// Effect direction
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Directness flag
    pub fn direct(&self) -> bool {
        self.direct
    }

    /// Classified relation; `None` when the effect was unrecognized
    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    /// Literature references
    pub fn references(&self) -> &BTreeSet<String> {
        &self.references
    }

    /// Curator identifier
    pub fn annotator(&self) -> Option<&str> {
        self.annotator.as_deref()
    }

    /// Curation date
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Source line number
    pub fn linenum(&self) -> usize {
        self.linenum
    }

    /// Term of the activity on B's side, once chaining found one
    pub fn regulated_activity_term(&self) -> Option<&str> {
        self.regulated_activity_term.as_deref()
    }

    pub(crate) fn set_regulated_activity_term(&mut self, term: String) {
        self.regulated_activity_term = Some(term);
    }

    /// Union `other`'s references into this statement
    pub fn merge_references(&mut self, other: &CausalStatement) {
        self.references.extend(other.references.iter().cloned());
    }

    /// Same entity pair, mechanism, relation and regulated activity
    pub fn structurally_equal(&self, other: &CausalStatement) -> bool {
        self.entity_a == other.entity_a
            && self.entity_b == other.entity_b
            && self.mechanism == other.mechanism
            && self.relation == other.relation
            && self.regulated_activity_term == other.regulated_activity_term
    }

    /// Evidence for edges derived from this statement
    pub fn evidence(&self, code: &str) -> Evidence {
        Evidence::with_code(code, self.references.iter().cloned())
            .with_contributor(self.annotator.clone())
            .with_date(self.date.clone())
    }
}
