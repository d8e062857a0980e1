//! Error types for ingestion

use sigcam_domain::{GroupingError, MappingError};
use thiserror::Error;

/// Errors that can occur while loading tables or importing a batch
#[derive(Error, Debug)]
pub enum IngestError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from a table header
    #[error("Missing column '{column}' in {table}")]
    MissingColumn {
        /// Table being read
        table: String,
        /// Expected column name
        column: String,
    },

    /// A complex or family id appears twice in its reference table
    #[error("Duplicate grouping id in reference table: {0}")]
    DuplicateGroupingId(String),

    /// A reference table row cannot be used
    #[error("Invalid row in {table}: {reason}")]
    InvalidRow {
        /// Table being read
        table: String,
        /// What is wrong with it
        reason: String,
    },

    /// The mechanism mapping table is inconsistent
    #[error("Mechanism mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The graph emitter failed while chaining
    #[error("Emit error: {0}")]
    Emit(String),
}

impl From<GroupingError> for IngestError {
    fn from(e: GroupingError) -> Self {
        match e {
            GroupingError::DuplicateId(id) => IngestError::DuplicateGroupingId(id),
            GroupingError::EmptyId => IngestError::InvalidRow {
                table: "grouping table".to_string(),
                reason: "empty grouping id".to_string(),
            },
        }
    }
}
