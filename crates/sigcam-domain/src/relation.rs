//! Effect directions and the regulatory relation classifier

use std::fmt;

/// Effect of the regulator on the regulated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Text starting with "up-regulates"
    UpRegulates,
    /// Text starting with "down-regulates"
    DownRegulates,
    /// "unknown" or empty
    Unknown,
    /// Anything else; no relation can be derived
    Other,
}

impl Effect {
    /// Parse by prefix so variants like "up-regulates quantity" are absorbed
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        if text.starts_with("up-regulates") {
            Effect::UpRegulates
        } else if text.starts_with("down-regulates") {
            Effect::DownRegulates
        } else if text.is_empty() || text.starts_with("unknown") {
            Effect::Unknown
        } else {
            Effect::Other
        }
    }
}

/// Regulatory relation between two activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// causally upstream of, positive effect
    CausallyUpstreamOfPositiveEffect,
    /// causally upstream of, negative effect
    CausallyUpstreamOfNegativeEffect,
    /// causally upstream of
    CausallyUpstreamOf,
    /// directly positively regulates
    DirectlyPositivelyRegulates,
    /// directly negatively regulates
    DirectlyNegativelyRegulates,
    /// positively regulates
    PositivelyRegulates,
    /// negatively regulates
    NegativelyRegulates,
    /// regulates
    Regulates,
}

impl Relation {
    /// All relations
    pub const ALL: [Relation; 8] = [
        Relation::CausallyUpstreamOfPositiveEffect,
        Relation::CausallyUpstreamOfNegativeEffect,
        Relation::CausallyUpstreamOf,
        Relation::DirectlyPositivelyRegulates,
        Relation::DirectlyNegativelyRegulates,
        Relation::PositivelyRegulates,
        Relation::NegativelyRegulates,
        Relation::Regulates,
    ];

    /// Relation ontology identifier
    pub fn curie(&self) -> &'static str {
        match self {
            Relation::CausallyUpstreamOfPositiveEffect => "RO:0002304",
            Relation::CausallyUpstreamOfNegativeEffect => "RO:0002305",
            Relation::CausallyUpstreamOf => "RO:0002411",
            Relation::DirectlyPositivelyRegulates => "RO:0002629",
            Relation::DirectlyNegativelyRegulates => "RO:0002630",
            Relation::PositivelyRegulates => "RO:0002213",
            Relation::NegativelyRegulates => "RO:0002212",
            Relation::Regulates => "RO:0002211",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Relation::CausallyUpstreamOfPositiveEffect => "causally upstream of, positive effect",
            Relation::CausallyUpstreamOfNegativeEffect => "causally upstream of, negative effect",
            Relation::CausallyUpstreamOf => "causally upstream of",
            Relation::DirectlyPositivelyRegulates => "directly positively regulates",
            Relation::DirectlyNegativelyRegulates => "directly negatively regulates",
            Relation::PositivelyRegulates => "positively regulates",
            Relation::NegativelyRegulates => "negatively regulates",
            Relation::Regulates => "regulates",
        }
    }

    /// Relation whose curie is `curie`
    pub fn from_curie(curie: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.curie() == curie)
    }

    /// Effect-signed "regulates"
    pub fn signed_regulates(effect: Effect) -> Self {
        match effect {
            Effect::UpRegulates => Relation::PositivelyRegulates,
            Effect::DownRegulates => Relation::NegativelyRegulates,
            Effect::Unknown | Effect::Other => Relation::Regulates,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The only place a statement's relation is derived
pub fn classify(effect: Effect, direct: bool, mechanism_is_root: bool) -> Option<Relation> {
    match (effect, mechanism_is_root, direct) {
        (Effect::UpRegulates, true, _) => Some(Relation::CausallyUpstreamOfPositiveEffect),
        (Effect::UpRegulates, false, true) => Some(Relation::DirectlyPositivelyRegulates),
        (Effect::UpRegulates, false, false) => Some(Relation::PositivelyRegulates),
        (Effect::DownRegulates, true, _) => Some(Relation::CausallyUpstreamOfNegativeEffect),
        (Effect::DownRegulates, false, true) => Some(Relation::DirectlyNegativelyRegulates),
        (Effect::DownRegulates, false, false) => Some(Relation::NegativelyRegulates),
        (Effect::Unknown, true, _) => Some(Relation::CausallyUpstreamOf),
        (Effect::Unknown, false, _) => Some(Relation::Regulates),
        (Effect::Other, _, _) => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn effect_text() -> impl Strategy<Value = String> {
        prop_oneof![
            "up-regulates[a-z ]{0,12}",
            "down-regulates[a-z ]{0,12}",
            Just("unknown".to_string()),
            Just(String::new()),
            "[a-z]{1,10}",
        ]
    }

    proptest! {
        #[test]
        fn prop_relation_is_a_function_of_its_inputs(
            text in effect_text(),
            direct in any::<bool>(),
            root in any::<bool>(),
        ) {
            let effect = Effect::parse(&text);
            let relation = classify(effect, direct, root);
            prop_assert_eq!(relation, classify(effect, direct, root));

            match effect {
                Effect::Other => prop_assert!(relation.is_none()),
                Effect::Unknown => prop_assert!(matches!(
                    relation,
                    Some(Relation::CausallyUpstreamOf) | Some(Relation::Regulates)
                )),
                _ => prop_assert!(relation.is_some()),
            }
            if root {
                prop_assert_eq!(relation, classify(effect, !direct, root));
            }
        }
    }
}
