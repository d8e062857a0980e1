//! Configuration for ingestion

use serde::{Deserialize, Serialize};
use sigcam_domain::{terms, EntityKind};

/// Configuration for the Importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Declared entity types a record may carry on both sides
    pub accepted_entity_types: Vec<String>,

    /// Delimiter of pathway files
    pub input_delimiter: char,

    /// Delimiter of complex and family tables
    pub grouping_delimiter: char,

    /// Separator inside a grouping's member list
    pub member_separator: String,

    /// Prefix applied to bare references
    pub reference_prefix: String,

    /// Evidence code attached to every edge
    pub evidence_code: String,

    /// Effect labels denoting complex formation; such records are dropped
    pub complex_formation_effects: Vec<String>,
}

impl IngestConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.accepted_entity_types.is_empty() {
            return Err("accepted_entity_types must not be empty".to_string());
        }
        for declared in &self.accepted_entity_types {
            match EntityKind::from_declared_type(declared) {
                None => {
                    return Err(format!("Unknown entity type in accepted_entity_types: {}", declared));
                }
                Some(EntityKind::ProteinFamily) => {
                    return Err(format!("Protein families cannot be statement endpoints: {}", declared));
                }
                Some(_) => {}
            }
        }
        if !self.input_delimiter.is_ascii() {
            return Err("input_delimiter must be an ASCII character".to_string());
        }
        if !self.grouping_delimiter.is_ascii() {
            return Err("grouping_delimiter must be an ASCII character".to_string());
        }
        if self.member_separator.is_empty() {
            return Err("member_separator must not be empty".to_string());
        }
        if !self.evidence_code.contains(':') {
            return Err(format!("evidence_code must be a CURIE: {}", self.evidence_code));
        }
        Ok(())
    }

    /// Pathway delimiter as a byte
    pub fn input_delimiter_byte(&self) -> u8 {
        ascii_byte(self.input_delimiter)
    }

    /// Grouping table delimiter as a byte
    pub fn grouping_delimiter_byte(&self) -> u8 {
        ascii_byte(self.grouping_delimiter)
    }

    /// True if `declared` is one of the accepted types
    pub fn accepts_type(&self, declared: &str) -> bool {
        let declared = declared.trim();
        self.accepted_entity_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(declared))
    }

    /// True if `effect` denotes complex formation
    pub fn is_complex_formation(&self, effect: &str) -> bool {
        let effect = effect.trim();
        self.complex_formation_effects
            .iter()
            .any(|e| e.eq_ignore_ascii_case(effect))
    }
}

impl Default for IngestConfig {
    /// Proteins, complexes, chemicals and microRNAs; families excluded
    fn default() -> Self {
        Self {
            accepted_entity_types: vec![
                "protein".to_string(),
                "complex".to_string(),
                "chemical".to_string(),
                "smallmolecule".to_string(),
                "mirna".to_string(),
            ],
            input_delimiter: '\t',
            grouping_delimiter: ';',
            member_separator: ",".to_string(),
            reference_prefix: terms::PUBMED_PREFIX.to_string(),
            evidence_code: terms::EXPERIMENTAL_EVIDENCE.to_string(),
            complex_formation_effects: vec!["form complex".to_string(), "form_complex".to_string()],
        }
    }
}

impl IngestConfig {
    /// Strict preset: protein and complex records only
    pub fn strict() -> Self {
        Self {
            accepted_entity_types: vec!["protein".to_string(), "complex".to_string()],
            ..Self::default()
        }
    }

    /// Permissive preset: also accepts the spelled-out type labels
    pub fn permissive() -> Self {
        let mut config = Self::default();
        config.accepted_entity_types.push("small molecule".to_string());
        config.accepted_entity_types.push("microrna".to_string());
        config
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

fn ascii_byte(c: char) -> u8 {
    if c.is_ascii() {
        c as u8
    } else {
        b'\t'
    }
}
