//! Intermediary process rules
//!
//! Some mechanisms do not regulate the downstream activity directly but
//! through a biological process (degradation, transcription, silencing).
//! A matching rule replaces the single regulatory edge with two edges
//! through a process node. The table is data; chaining only asks it for
//! the first matching rule.

use crate::entity::EntityKind;
use crate::relation::{Effect, Relation};
use crate::statement::CausalStatement;
use crate::terms;

/// Relation used on one side of an intermediary process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleRelation {
    /// Always this relation
    Fixed(Relation),
    /// Positively / negatively / plain regulates, following the statement's effect
    FollowEffect,
}

impl RuleRelation {
    /// Concrete relation for a statement with `effect`
    pub fn resolve(&self, effect: Effect) -> Relation {
        match self {
            RuleRelation::Fixed(relation) => *relation,
            RuleRelation::FollowEffect => Relation::signed_regulates(effect),
        }
    }
}

/// One row of the intermediary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediaryRule {
    /// Mechanism terms the rule applies to
    pub mechanism_terms: Vec<String>,
    /// Required effect, if any
    pub effect: Option<Effect>,
    /// Required kind of the regulating entity, if any
    pub regulator: Option<EntityKind>,
    /// Process inserted between the activities
    pub process_term: String,
    /// Label of the process node
    pub process_label: String,
    /// Regulating activity to process
    pub upstream: RuleRelation,
    /// Process to regulated activity
    pub downstream: RuleRelation,
}

impl IntermediaryRule {
    /// True if the rule applies to `statement`
    pub fn matches(&self, statement: &CausalStatement) -> bool {
        self.mechanism_terms
            .iter()
            .any(|t| *t == statement.mechanism().term)
            && self.effect.map_or(true, |e| e == statement.effect())
            && self
                .regulator
                .map_or(true, |k| k == statement.entity_a().kind())
    }

    /// (upstream, downstream) relations for `statement`
    pub fn relations(&self, statement: &CausalStatement) -> (Relation, Relation) {
        (
            self.upstream.resolve(statement.effect()),
            self.downstream.resolve(statement.effect()),
        )
    }
}

/// Ordered rule table; the first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediaryRules {
    rules: Vec<IntermediaryRule>,
}

impl IntermediaryRules {
    /// Table without any rule
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule (builder style)
    pub fn with_rule(mut self, rule: IntermediaryRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a rule, consulted after the existing ones
    pub fn push(&mut self, rule: IntermediaryRule) {
        self.rules.push(rule);
    }

    /// Insert a rule ahead of all existing ones
    pub fn prepend(&mut self, rule: IntermediaryRule) {
        self.rules.insert(0, rule);
    }

    /// First rule matching `statement`
    pub fn find(&self, statement: &CausalStatement) -> Option<&IntermediaryRule> {
        self.rules.iter().find(|r| r.matches(statement))
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[IntermediaryRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for IntermediaryRules {
    fn default() -> Self {
        let utr_terms = vec![
            terms::MRNA_3_UTR_BINDING.to_string(),
            terms::MRNA_3_UTR_AU_RICH_REGION_BINDING.to_string(),
        ];

        Self::empty()
            .with_rule(IntermediaryRule {
                mechanism_terms: vec![terms::UBIQUITIN_PROTEIN_LIGASE_ACTIVITY.to_string()],
                effect: Some(Effect::DownRegulates),
                regulator: None,
                process_term: terms::PROTEASOME_MEDIATED_CATABOLIC_PROCESS.to_string(),
                process_label: "proteasome-mediated ubiquitin-dependent protein catabolic process"
                    .to_string(),
                upstream: RuleRelation::Fixed(Relation::PositivelyRegulates),
                downstream: RuleRelation::Fixed(Relation::NegativelyRegulates),
            })
            .with_rule(IntermediaryRule {
                mechanism_terms: vec![
                    terms::DNA_BINDING_TRANSCRIPTION_FACTOR_ACTIVITY.to_string(),
                    terms::TRANSCRIPTION_REGULATOR_ACTIVITY.to_string(),
                ],
                effect: None,
                regulator: None,
                process_term: terms::MRNA_TRANSCRIPTION.to_string(),
                process_label: "mRNA transcription".to_string(),
                upstream: RuleRelation::FollowEffect,
                downstream: RuleRelation::FollowEffect,
            })
            .with_rule(IntermediaryRule {
                mechanism_terms: utr_terms.clone(),
                effect: None,
                regulator: Some(EntityKind::MicroRna),
                process_term: terms::GENE_SILENCING_BY_MIRNA.to_string(),
                process_label: "miRNA-mediated gene silencing".to_string(),
                upstream: RuleRelation::Fixed(Relation::PositivelyRegulates),
                downstream: RuleRelation::Fixed(Relation::NegativelyRegulates),
            })
            .with_rule(IntermediaryRule {
                mechanism_terms: utr_terms.clone(),
                effect: Some(Effect::DownRegulates),
                regulator: Some(EntityKind::Protein),
                process_term: terms::MRNA_CATABOLIC_PROCESS.to_string(),
                process_label: "mRNA catabolic process".to_string(),
                upstream: RuleRelation::Fixed(Relation::PositivelyRegulates),
                downstream: RuleRelation::Fixed(Relation::NegativelyRegulates),
            })
            .with_rule(IntermediaryRule {
                mechanism_terms: utr_terms,
                effect: Some(Effect::UpRegulates),
                regulator: Some(EntityKind::Protein),
                process_term: terms::MRNA_CATABOLIC_PROCESS.to_string(),
                process_label: "mRNA catabolic process".to_string(),
                upstream: RuleRelation::Fixed(Relation::NegativelyRegulates),
                downstream: RuleRelation::Fixed(Relation::NegativelyRegulates),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::mechanism::Mechanism;
    use std::sync::Arc;

    fn statement(a: Entity, term: &str, effect: Effect) -> CausalStatement {
        CausalStatement::new(
            Arc::new(a),
            Arc::new(Entity::protein("P2", "B")),
            Mechanism {
                label: "x".into(),
                term: term.into(),
                catalytic: false,
            },
            effect,
            true,
            Vec::new(),
            None,
            None,
            1,
        )
    }

    #[test]
    fn test_ubiquitination_only_when_down_regulating() {
        let rules = IntermediaryRules::default();
        let down = statement(
            Entity::protein("P1", "A"),
            terms::UBIQUITIN_PROTEIN_LIGASE_ACTIVITY,
            Effect::DownRegulates,
        );
        let up = statement(
            Entity::protein("P1", "A"),
            terms::UBIQUITIN_PROTEIN_LIGASE_ACTIVITY,
            Effect::UpRegulates,
        );
        let rule = rules.find(&down).unwrap();
        assert_eq!(rule.process_term, terms::PROTEASOME_MEDIATED_CATABOLIC_PROCESS);
        assert_eq!(
            rule.relations(&down),
            (Relation::PositivelyRegulates, Relation::NegativelyRegulates)
        );
        assert!(rules.find(&up).is_none());
    }

    #[test]
    fn test_transcription_follows_effect() {
        let rules = IntermediaryRules::default();
        let s = statement(
            Entity::protein("P1", "A"),
            terms::DNA_BINDING_TRANSCRIPTION_FACTOR_ACTIVITY,
            Effect::DownRegulates,
        );
        let rule = rules.find(&s).unwrap();
        assert_eq!(rule.process_term, terms::MRNA_TRANSCRIPTION);
        assert_eq!(
            rule.relations(&s),
            (Relation::NegativelyRegulates, Relation::NegativelyRegulates)
        );
    }

    #[test]
    fn test_utr_binding_depends_on_regulator_kind() {
        let rules = IntermediaryRules::default();
        let mirna = statement(
            Entity::micro_rna("MIMAT1", "miR"),
            terms::MRNA_3_UTR_AU_RICH_REGION_BINDING,
            Effect::DownRegulates,
        );
        let protein = statement(
            Entity::protein("P1", "A"),
            terms::MRNA_3_UTR_BINDING,
            Effect::UpRegulates,
        );
        assert_eq!(rules.find(&mirna).unwrap().process_term, terms::GENE_SILENCING_BY_MIRNA);
        let rule = rules.find(&protein).unwrap();
        assert_eq!(rule.process_term, terms::MRNA_CATABOLIC_PROCESS);
        assert_eq!(
            rule.relations(&protein),
            (Relation::NegativelyRegulates, Relation::NegativelyRegulates)
        );
    }

    #[test]
    fn test_kinase_has_no_intermediary() {
        let rules = IntermediaryRules::default();
        let s = statement(
            Entity::protein("P1", "A"),
            terms::PROTEIN_KINASE_ACTIVITY,
            Effect::UpRegulates,
        );
        assert!(rules.find(&s).is_none());
    }

    #[test]
    fn test_prepended_rule_takes_precedence() {
        let mut rules = IntermediaryRules::default();
        rules.prepend(IntermediaryRule {
            mechanism_terms: vec![terms::DNA_BINDING_TRANSCRIPTION_FACTOR_ACTIVITY.to_string()],
            effect: None,
            regulator: None,
            process_term: "GO:0006366".into(),
            process_label: "transcription by RNA polymerase II".into(),
            upstream: RuleRelation::FollowEffect,
            downstream: RuleRelation::FollowEffect,
        });
        let s = statement(
            Entity::protein("P1", "A"),
            terms::DNA_BINDING_TRANSCRIPTION_FACTOR_ACTIVITY,
            Effect::UpRegulates,
        );
        assert_eq!(rules.find(&s).unwrap().process_term, "GO:0006366");
        assert_eq!(rules.len(), 6);
    }
}
