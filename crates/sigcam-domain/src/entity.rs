//! Biological participants of causal statements

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::node::{NodeCache, NodeKey};
use crate::terms;
use crate::traits::GraphEmitter;

/// Resolved entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Gene product with a protein accession
    Protein,
    /// Micro RNA
    MicroRna,
    /// Chemical, normalized to the chemical ontology namespace
    SmallMolecule,
    /// Protein-containing complex
    Complex,
    /// Protein family
    ProteinFamily,
}

impl EntityKind {
    /// Parse a declared type label from a source record (case-insensitive)
    pub fn from_declared_type(declared: &str) -> Option<Self> {
        match declared.trim().to_lowercase().as_str() {
            "protein" => Some(EntityKind::Protein),
            "mirna" | "microrna" => Some(EntityKind::MicroRna),
            "smallmolecule" | "small molecule" | "chemical" => Some(EntityKind::SmallMolecule),
            "complex" => Some(EntityKind::Complex),
            "proteinfamily" | "protein family" => Some(EntityKind::ProteinFamily),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Protein => "protein",
            EntityKind::MicroRna => "mirna",
            EntityKind::SmallMolecule => "smallmolecule",
            EntityKind::Complex => "complex",
            EntityKind::ProteinFamily => "proteinfamily",
        }
    }

    /// True for complexes and families
    pub fn is_grouping(&self) -> bool {
        matches!(self, EntityKind::Complex | EntityKind::ProteinFamily)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named set of member entities (complex or protein family)
#[derive(Debug, Clone)]
pub struct Grouping {
    /// Grouping id, e.g. `SIGNOR-C1`
    pub id: String,
    /// Grouping name
    pub name: String,
    /// Member ids in source order
    pub members: Vec<String>,
}

impl Grouping {
    /// Create a grouping
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members,
        }
    }
}

/// A resolved biological entity
///
/// Equality and hashing only look at `(id, name)`, so two instances built
/// from different records are interchangeable when they agree on both.
#[derive(Debug, Clone)]
pub enum Entity {
    /// Protein accession
    Protein {
        /// Accession
        id: String,
        /// Display name
        name: String,
    },
    /// Micro RNA accession
    MicroRna {
        /// Accession
        id: String,
        /// Display name
        name: String,
    },
    /// Small molecule, id already normalized
    SmallMolecule {
        /// Normalized chemical id
        id: String,
        /// Display name
        name: String,
    },
    /// Protein-containing complex
    Complex(Grouping),
    /// Protein family
    ProteinFamily(Grouping),
}

impl Entity {
    /// Build a protein
    pub fn protein(id: impl Into<String>, name: impl Into<String>) -> Self {
        Entity::Protein {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build a micro RNA
    pub fn micro_rna(id: impl Into<String>, name: impl Into<String>) -> Self {
        Entity::MicroRna {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build a small molecule; the id is normalized to the chemical namespace
    pub fn small_molecule(id: &str, name: impl Into<String>) -> Self {
        Entity::SmallMolecule {
            id: normalize_small_molecule_id(id),
            name: name.into(),
        }
    }

    /// Raw identifier
    pub fn id(&self) -> &str {
        match self {
            Entity::Protein { id, .. }
            | Entity::MicroRna { id, .. }
            | Entity::SmallMolecule { id, .. } => id,
            Entity::Complex(g) | Entity::ProteinFamily(g) => &g.id,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        match self {
            Entity::Protein { name, .. }
            | Entity::MicroRna { name, .. }
            | Entity::SmallMolecule { name, .. } => name,
            Entity::Complex(g) | Entity::ProteinFamily(g) => &g.name,
        }
    }

    /// Resolved type
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Protein { .. } => EntityKind::Protein,
            Entity::MicroRna { .. } => EntityKind::MicroRna,
            Entity::SmallMolecule { .. } => EntityKind::SmallMolecule,
            Entity::Complex(_) => EntityKind::Complex,
            Entity::ProteinFamily(_) => EntityKind::ProteinFamily,
        }
    }

    /// Members of a grouping; empty for single entities
    pub fn members(&self) -> &[String] {
        match self {
            Entity::Complex(g) | Entity::ProteinFamily(g) => &g.members,
            _ => &[],
        }
    }

    /// True for small molecules
    pub fn is_small_molecule(&self) -> bool {
        matches!(self, Entity::SmallMolecule { .. })
    }

    /// Namespaced identifier
    pub fn full_id(&self) -> String {
        match self {
            Entity::Protein { id, .. } => prefixed(id, terms::UNIPROT_PREFIX),
            Entity::MicroRna { id, .. } => prefixed(id, terms::MIRBASE_PREFIX),
            Entity::SmallMolecule { id, .. } => id.clone(),
            Entity::Complex(g) | Entity::ProteinFamily(g) => g.id.clone(),
        }
    }

    /// Ontology class the entity node is typed with
    pub fn class_id(&self) -> String {
        match self {
            Entity::Complex(_) | Entity::ProteinFamily(_) => {
                terms::PROTEIN_CONTAINING_COMPLEX.to_string()
            }
            _ => self.full_id(),
        }
    }

    /// Declare this entity's node, plus member nodes for groupings
    ///
    /// Groupings get one `has part` edge per member. Declaring the same
    /// entity twice through one cache returns the first handle.
    pub fn declare<E: GraphEmitter>(
        &self,
        emitter: &mut E,
        cache: &mut NodeCache<E::Node>,
    ) -> Result<E::Node, E::Error> {
        let key = NodeKey::Entity(self.full_id());
        if let Some(node) = cache.get(&key) {
            return Ok(node.clone());
        }

        match self {
            Entity::Protein { .. } | Entity::MicroRna { .. } | Entity::SmallMolecule { .. } => {
                let (node, _) = cache.get_or_declare(emitter, key, &self.class_id(), None)?;
                Ok(node)
            }
            Entity::Complex(g) | Entity::ProteinFamily(g) => {
                let (node, _) =
                    cache.get_or_declare(emitter, key, &self.class_id(), Some(&g.name))?;
                for member in &g.members {
                    let member_id = member_full_id(member);
                    let member_key = NodeKey::Member {
                        grouping: g.id.clone(),
                        member: member_id.clone(),
                    };
                    let (member_node, _) =
                        cache.get_or_declare(emitter, member_key, &member_id, None)?;
                    emitter.ensure_edge(&node, terms::HAS_PART, &member_node)?;
                }
                Ok(node)
            }
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.name() == other.name()
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
        self.name().hash(state);
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.full_id())
    }
}

/// Normalize a small-molecule id to the chemical ontology namespace
///
/// Idempotent: already prefixed ids keep their local part and get the
/// canonical prefix casing.
pub fn normalize_small_molecule_id(id: &str) -> String {
    let id = id.trim();
    let prefix_len = terms::CHEBI_PREFIX.len();
    match id.get(..prefix_len) {
        Some(head) if head.eq_ignore_ascii_case(terms::CHEBI_PREFIX) => {
            format!("{}{}", terms::CHEBI_PREFIX, &id[prefix_len..])
        }
        _ => format!("{}{}", terms::CHEBI_PREFIX, id),
    }
}

/// Namespaced id of a grouping member
///
/// Members that already carry a namespace or are themselves groupings are
/// kept as-is; bare accessions are proteins.
pub fn member_full_id(member: &str) -> String {
    if member.contains(':') || terms::is_complex_id(member) || terms::is_family_id(member) {
        member.to_string()
    } else {
        format!("{}{}", terms::UNIPROT_PREFIX, member)
    }
}

fn prefixed(id: &str, prefix: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("{}{}", prefix, id)
    }
}
