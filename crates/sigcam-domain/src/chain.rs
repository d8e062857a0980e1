//! Two-pass chaining of statements into activity-regulates-activity edges
//!
//! A statement's regulated activity is only known once another statement
//! names its entity B as entity A, so every activity is declared first and
//! connected in a second pass.

use std::collections::HashSet;

use tracing::debug;

use crate::entity::Entity;
use crate::error::ChainError;
use crate::intermediary::IntermediaryRules;
use crate::mechanism::Mechanism;
use crate::node::{NodeCache, NodeKey};
use crate::relation::Effect;
use crate::statement_set::StatementSet;
use crate::terms;
use crate::traits::GraphEmitter;

/// Counters produced by [`StatementSet::chain`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Statements visited
    pub statements: usize,
    /// New enabled-by edges
    pub enabled_by_edges: usize,
    /// New has-input / has-output edges
    pub participant_edges: usize,
    /// New direct regulatory edges between activities
    pub regulatory_edges: usize,
    /// Links routed through an intermediary process
    pub intermediary_processes: usize,
    /// Statements treated as small-molecule catalysis
    pub small_molecule_catalysis: usize,
    /// Statements whose entity B regulates nothing
    pub dead_ends: usize,
    /// Statements without a relation
    pub without_relation: usize,
}

impl ChainReport {
    /// Total edges emitted between activities, participants and entities
    pub fn total_edges(&self) -> usize {
        self.enabled_by_edges
            + self.participant_edges
            + self.regulatory_edges
            + 2 * self.intermediary_processes
    }
}

/// Activity key for `entity` performing `mechanism`
pub fn activity_key(entity: &Entity, mechanism: &Mechanism) -> NodeKey {
    NodeKey::activity(entity.full_id(), mechanism.term.clone())
}

impl StatementSet {
    /// Realize every statement through `emitter`
    ///
    /// Statements with no relation still get their enabled-by edge but never
    /// a regulatory edge. An activity never regulates itself.
    pub fn chain<E: GraphEmitter>(
        &mut self,
        emitter: &mut E,
        rules: &IntermediaryRules,
    ) -> Result<ChainReport, ChainError<E::Error>> {
        let mut cache: NodeCache<E::Node> = NodeCache::new();
        let mut report = ChainReport {
            statements: self.statements.len(),
            ..ChainReport::default()
        };

        // Upstream pass
        for statement in &self.statements {
            let entity = statement
                .entity_a()
                .declare(emitter, &mut cache)
                .map_err(ChainError::Emitter)?;
            let (activity, _) = cache
                .get_or_declare(
                    emitter,
                    activity_key(statement.entity_a(), statement.mechanism()),
                    &statement.mechanism().term,
                    None,
                )
                .map_err(ChainError::Emitter)?;

            if statement.relation().is_none() {
                report.without_relation += 1;
            }
            if statement.entity_a().is_small_molecule() {
                continue;
            }

            let (edge, created) = emitter
                .ensure_edge(&activity, terms::ENABLED_BY, &entity)
                .map_err(ChainError::Emitter)?;
            emitter
                .attach_evidence(&edge, &statement.evidence(&self.evidence_code))
                .map_err(ChainError::Emitter)?;
            if created {
                report.enabled_by_edges += 1;
            }
        }

        // Downstream pass
        for index in 0..self.statements.len() {
            let downstream = self.downstream_indices(index);
            let Some(&first) = downstream.first() else {
                let statement = &self.statements[index];
                debug!(
                    line = statement.linenum(),
                    entity = %statement.entity_b().full_id(),
                    "Causal chain ends at an entity with no outgoing statement"
                );
                report.dead_ends += 1;
                continue;
            };

            let first_term = self.statements[first].mechanism().term.clone();
            self.statements[index].set_regulated_activity_term(first_term);

            let statement = &self.statements[index];
            let evidence = statement.evidence(&self.evidence_code);
            let own_key = activity_key(statement.entity_a(), statement.mechanism());
            let activity = lookup(&cache, &own_key)?;

            if !statement.entity_a().is_small_molecule() {
                let participant = lookup(&cache, &NodeKey::Entity(statement.entity_b().full_id()))?;
                let predicate =
                    if statement.mechanism().catalytic && statement.effect() == Effect::UpRegulates {
                        terms::HAS_OUTPUT
                    } else {
                        terms::HAS_INPUT
                    };
                let (edge, created) = emitter
                    .ensure_edge(&activity, predicate, &participant)
                    .map_err(ChainError::Emitter)?;
                emitter
                    .attach_evidence(&edge, &evidence)
                    .map_err(ChainError::Emitter)?;
                if created {
                    report.participant_edges += 1;
                }
            }

            if statement.mechanism().catalytic && statement.entity_b().is_small_molecule() {
                report.small_molecule_catalysis += 1;
                continue;
            }

            let Some(relation) = statement.relation() else {
                continue;
            };

            // Downstream statements sharing an activity map to one edge
            let mut targets = HashSet::new();
            for &m in &downstream {
                let target = &self.statements[m];
                let target_key = activity_key(target.entity_a(), target.mechanism());
                if target_key == own_key || !targets.insert(target_key.clone()) {
                    continue;
                }
                let target_activity = lookup(&cache, &target_key)?;

                match rules.find(statement) {
                    Some(rule) => {
                        let (upstream, downstream_relation) = rule.relations(statement);
                        let (process, _) = cache
                            .get_or_declare(
                                emitter,
                                NodeKey::Process {
                                    term: rule.process_term.clone(),
                                    from: own_key.to_string(),
                                    to: target_key.to_string(),
                                },
                                &rule.process_term,
                                Some(&rule.process_label),
                            )
                            .map_err(ChainError::Emitter)?;

                        let (first_edge, created) = emitter
                            .ensure_edge(&activity, upstream.curie(), &process)
                            .map_err(ChainError::Emitter)?;
                        emitter
                            .attach_evidence(&first_edge, &evidence)
                            .map_err(ChainError::Emitter)?;
                        let (second_edge, _) = emitter
                            .ensure_edge(&process, downstream_relation.curie(), &target_activity)
                            .map_err(ChainError::Emitter)?;
                        emitter
                            .attach_evidence(&second_edge, &evidence)
                            .map_err(ChainError::Emitter)?;
                        if created {
                            report.intermediary_processes += 1;
                        }
                    }
                    None => {
                        let (edge, created) = emitter
                            .ensure_edge(&activity, relation.curie(), &target_activity)
                            .map_err(ChainError::Emitter)?;
                        emitter
                            .attach_evidence(&edge, &evidence)
                            .map_err(ChainError::Emitter)?;
                        if created {
                            report.regulatory_edges += 1;
                        }
                    }
                }
            }
        }

        debug!(
            statements = report.statements,
            regulatory = report.regulatory_edges,
            dead_ends = report.dead_ends,
            "Chaining complete"
        );
        Ok(report)
    }
}

fn lookup<N: Clone, E>(cache: &NodeCache<N>, key: &NodeKey) -> Result<N, ChainError<E>> {
    cache
        .get(key)
        .cloned()
        .ok_or_else(|| ChainError::MissingNode(key.to_string()))
}
