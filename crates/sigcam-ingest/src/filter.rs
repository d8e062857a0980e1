//! Record acceptance filter
//!
//! Runs before any entity or statement is built.

use std::fmt;
use std::sync::Arc;

use sigcam_domain::MechanismMapper;

use crate::config::IngestConfig;
use crate::record::PathwayRecord;

/// Why a record was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// One side carries a type outside the accepted set
    UnsupportedType(String),
    /// Mechanism label is neither mapped nor empty
    UnacceptableMechanism(String),
    /// Complex formation records are not causal statements
    ComplexFormation,
}

impl Rejection {
    /// Stable counter key
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::UnsupportedType(_) => "unsupported_type",
            Rejection::UnacceptableMechanism(_) => "unacceptable_mechanism",
            Rejection::ComplexFormation => "complex_formation",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnsupportedType(t) => write!(f, "unsupported entity type '{}'", t),
            Rejection::UnacceptableMechanism(m) => write!(f, "unacceptable mechanism '{}'", m),
            Rejection::ComplexFormation => write!(f, "complex formation"),
        }
    }
}

/// Decides which records proceed to resolution
#[derive(Debug, Clone)]
pub struct RecordFilter {
    config: IngestConfig,
    mapper: Arc<MechanismMapper>,
}

impl RecordFilter {
    /// Create a filter
    pub fn new(config: IngestConfig, mapper: Arc<MechanismMapper>) -> Self {
        Self { config, mapper }
    }

    /// Accept the record or say why not
    pub fn check(&self, record: &PathwayRecord) -> Result<(), Rejection> {
        for declared in [&record.type_a, &record.type_b] {
            if !self.config.accepts_type(declared) {
                return Err(Rejection::UnsupportedType(declared.clone()));
            }
        }
        if !self.mapper.is_acceptable(&record.mechanism) {
            return Err(Rejection::UnacceptableMechanism(record.mechanism.clone()));
        }
        if self.config.is_complex_formation(&record.effect) {
            return Err(Rejection::ComplexFormation);
        }
        Ok(())
    }
}
