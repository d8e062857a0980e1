//! The statements of one input batch
//!
//! Owns deduplication, kinase-over-binding precedence and the lookup
//! indexes used by chaining.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::entity::Entity;
use crate::statement::CausalStatement;
use crate::terms;

/// Result of [`StatementSet::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new statement was appended
    Inserted,
    /// References were merged into an existing equal statement
    Merged,
}

/// Deduplicated statements with lookups by entity A, entity pair and mechanism
#[derive(Debug, Clone)]
pub struct StatementSet {
    pub(crate) statements: Vec<CausalStatement>,
    by_entity_a: HashMap<String, Vec<usize>>,
    by_pair: HashMap<(String, String), Vec<usize>>,
    by_mechanism: HashMap<String, Vec<usize>>,
    pub(crate) evidence_code: String,
}

impl StatementSet {
    /// Empty set using experimental evidence
    pub fn new() -> Self {
        Self::with_evidence_code(terms::EXPERIMENTAL_EVIDENCE)
    }

    /// Empty set attaching `code` to every emitted edge
    pub fn with_evidence_code(code: impl Into<String>) -> Self {
        Self {
            statements: Vec::new(),
            by_entity_a: HashMap::new(),
            by_pair: HashMap::new(),
            by_mechanism: HashMap::new(),
            evidence_code: code.into(),
        }
    }

    /// Add a statement, merging references into a structurally equal one
    pub fn add(&mut self, statement: CausalStatement) -> AddOutcome {
        let pair = pair_key(&statement);
        if let Some(indices) = self.by_pair.get(&pair) {
            if let Some(&i) = indices
                .iter()
                .find(|&&i| self.statements[i].structurally_equal(&statement))
            {
                debug!(
                    line = statement.linenum(),
                    merged_into = self.statements[i].linenum(),
                    "Merged duplicate statement"
                );
                self.statements[i].merge_references(&statement);
                return AddOutcome::Merged;
            }
        }

        let index = self.statements.len();
        self.index(index, &statement);
        self.statements.push(statement);
        AddOutcome::Inserted
    }

    /// Drop binding statements for pairs that also have a kinase statement
    ///
    /// Returns the number of statements removed.
    pub fn apply_precedence(&mut self) -> usize {
        let mut dropped: HashSet<usize> = HashSet::new();
        for indices in self.by_pair.values() {
            if indices.len() < 2 {
                continue;
            }
            let has_kinase = indices
                .iter()
                .any(|&i| self.statements[i].mechanism().term == terms::PROTEIN_KINASE_ACTIVITY);
            if !has_kinase {
                continue;
            }
            dropped.extend(
                indices
                    .iter()
                    .copied()
                    .filter(|&i| self.statements[i].mechanism().term == terms::PROTEIN_BINDING),
            );
        }

        if dropped.is_empty() {
            return 0;
        }

        let statements = std::mem::take(&mut self.statements);
        for (i, statement) in statements.into_iter().enumerate() {
            if dropped.contains(&i) {
                debug!(
                    line = statement.linenum(),
                    a = %statement.entity_a().full_id(),
                    b = %statement.entity_b().full_id(),
                    "Dropped binding statement in favour of kinase activity"
                );
            } else {
                self.statements.push(statement);
            }
        }
        self.reindex();
        dropped.len()
    }

    /// Statements in insertion order
    pub fn statements(&self) -> &[CausalStatement] {
        &self.statements
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True if the set is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements whose entity A is `entity`
    pub fn find_by_entity_a<'a>(&'a self, entity: &'a Entity) -> impl Iterator<Item = &'a CausalStatement> + 'a {
        self.indices_by_entity_a(entity)
            .iter()
            .map(move |&i| &self.statements[i])
            .filter(move |s| s.entity_a().as_ref() == entity)
    }

    /// Statements from `a` to `b`
    pub fn find_by_pair<'a>(
        &'a self,
        a: &'a Entity,
        b: &'a Entity,
    ) -> impl Iterator<Item = &'a CausalStatement> + 'a {
        self.by_pair
            .get(&(a.full_id(), b.full_id()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.statements[i])
            .filter(move |s| s.entity_a().as_ref() == a && s.entity_b().as_ref() == b)
    }

    /// Statements whose mechanism term is `term`
    pub fn find_by_mechanism<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a CausalStatement> + 'a {
        self.by_mechanism
            .get(term)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.statements[i])
    }

    /// Statements whose entity A is `statement`'s entity B
    pub fn downstream_of<'a>(&'a self, statement: &'a CausalStatement) -> impl Iterator<Item = &'a CausalStatement> + 'a {
        self.find_by_entity_a(statement.entity_b())
    }

    /// Indices of the statements downstream of statement `index`, in insertion order
    pub(crate) fn downstream_indices(&self, index: usize) -> Vec<usize> {
        let entity_b = self.statements[index].entity_b();
        self.indices_by_entity_a(entity_b)
            .iter()
            .copied()
            .filter(|&i| self.statements[i].entity_a() == entity_b)
            .collect()
    }

    fn indices_by_entity_a(&self, entity: &Entity) -> &[usize] {
        self.by_entity_a
            .get(&entity.full_id())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn index(&mut self, index: usize, statement: &CausalStatement) {
        self.by_entity_a
            .entry(statement.entity_a().full_id())
            .or_default()
            .push(index);
        self.by_pair.entry(pair_key(statement)).or_default().push(index);
        self.by_mechanism
            .entry(statement.mechanism().term.clone())
            .or_default()
            .push(index);
    }

    fn reindex(&mut self) {
        self.by_entity_a.clear();
        self.by_pair.clear();
        self.by_mechanism.clear();
        let statements = std::mem::take(&mut self.statements);
        for (i, statement) in statements.iter().enumerate() {
            self.index(i, statement);
        }
        self.statements = statements;
    }
}

impl Default for StatementSet {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_key(statement: &CausalStatement) -> (String, String) {
    (
        statement.entity_a().full_id(),
        statement.entity_b().full_id(),
    )
}
