//! Mechanism labels and their ontology terms

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::error::MappingError;
use crate::terms;

/// The molecular activity mediating a causal statement
///
/// Two mechanisms are the same activity when their ontology terms agree,
/// whatever label the record used.
#[derive(Debug, Clone, Eq)]
pub struct Mechanism {
    /// Label as written in the source record
    pub label: String,
    /// Ontology term, the root term when unmapped
    pub term: String,
    /// Whether the participant is consumed or produced by the activity
    pub catalytic: bool,
}

impl Mechanism {
    /// Unspecified molecular function
    pub fn root(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            term: terms::MOLECULAR_FUNCTION.to_string(),
            catalytic: false,
        }
    }

    /// True when the term is the root molecular function
    pub fn is_root(&self) -> bool {
        self.term == terms::MOLECULAR_FUNCTION
    }
}

impl PartialEq for Mechanism {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

impl Hash for Mechanism {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.term.hash(state);
    }
}

/// One row of the mechanism mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MechanismEntry {
    /// Source mechanism label
    pub label: String,
    /// Mapped ontology term; `None` keeps the label unmapped
    pub term: Option<String>,
    /// Ontology label of the term
    pub term_label: Option<String>,
    /// Small-molecule catalysis flag
    pub catalytic: bool,
}

impl MechanismEntry {
    /// Mapped entry
    pub fn mapped(label: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            term: Some(term.into()),
            term_label: None,
            catalytic: false,
        }
    }

    /// Entry that exists in the table but maps to nothing
    pub fn unmapped(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            term: None,
            term_label: None,
            catalytic: false,
        }
    }

    /// Mark as catalytic
    pub fn catalytic(mut self) -> Self {
        self.catalytic = true;
        self
    }
}

/// Immutable label to term mapping
#[derive(Debug, Clone)]
pub struct MechanismMapper {
    entries: Vec<MechanismEntry>,
    by_label: HashMap<String, usize>,
    acceptable: HashSet<String>,
}

impl MechanismMapper {
    /// Build the mapper; labels must be unique
    pub fn from_entries<I>(entries: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = MechanismEntry>,
    {
        let mut mapper = Self {
            entries: Vec::new(),
            by_label: HashMap::new(),
            acceptable: HashSet::new(),
        };
        mapper.acceptable.insert(String::new());

        for mut entry in entries {
            entry.label = entry.label.trim().to_string();
            entry.term = entry
                .term
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty());

            if mapper.by_label.contains_key(&entry.label) {
                return Err(MappingError::DuplicateLabel(entry.label));
            }
            if entry.term.as_deref().is_some_and(|t| t != terms::MOLECULAR_FUNCTION) {
                mapper.acceptable.insert(entry.label.clone());
            }
            mapper.by_label.insert(entry.label.clone(), mapper.entries.len());
            mapper.entries.push(entry);
        }
        Ok(mapper)
    }

    /// Ontology term for `label`; unknown or empty labels map to the root term
    pub fn map(&self, label: &str) -> &str {
        self.entry(label)
            .and_then(|e| e.term.as_deref())
            .unwrap_or(terms::MOLECULAR_FUNCTION)
    }

    /// Full mechanism for `label`
    pub fn mechanism(&self, label: &str) -> Mechanism {
        let label = label.trim();
        match self.entry(label) {
            Some(MechanismEntry {
                term: Some(term),
                catalytic,
                ..
            }) => Mechanism {
                label: label.to_string(),
                term: term.clone(),
                catalytic: *catalytic,
            },
            _ => Mechanism::root(label),
        }
    }

    /// Labels with a non-root mapping, plus the empty label
    pub fn acceptable_mechanisms(&self) -> &HashSet<String> {
        &self.acceptable
    }

    /// True if records with this label may proceed
    pub fn is_acceptable(&self, label: &str) -> bool {
        self.acceptable.contains(label.trim())
    }

    /// Table rows in load order
    pub fn entries(&self) -> &[MechanismEntry] {
        &self.entries
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, label: &str) -> Option<&MechanismEntry> {
        self.by_label.get(label.trim()).map(|&i| &self.entries[i])
    }
}
