//! Sigcam Ingest
//!
//! Reads causal-interaction pathway files and their reference tables, and
//! drives the domain engine to produce an activity graph.
//!
//! # Architecture
//!
//! ```text
//! TSV → PathwayReader → RecordFilter → IdentityResolver → StatementSet → GraphEmitter
//! ```
//!
//! # Key Features
//!
//! - **Reference tables**: complexes, families, mechanism mapping, annotators
//! - **Acceptance filter**: entity types, mechanisms, complex formation
//! - **Batch reports**: every skipped or merged row is counted, none aborts the batch
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use sigcam_domain::ReferenceData;
//! use sigcam_ingest::{bundled_mechanisms, AnnotatorTable, Importer, IngestConfig};
//! use sigcam_store::SqliteGraphStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let importer = Importer::new(
//!     Arc::new(ReferenceData::empty()),
//!     Arc::new(bundled_mechanisms()?),
//!     Arc::new(AnnotatorTable::new()),
//!     IngestConfig::default(),
//! )?;
//!
//! let mut store = SqliteGraphStore::new(":memory:")?;
//! let report = importer.import_path("pathway.tsv", &mut store)?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod importer;
mod record;
mod report;
mod tables;

pub use config::IngestConfig;
pub use error::IngestError;
pub use filter::{RecordFilter, Rejection};
pub use importer::Importer;
pub use record::{normalize_header, parse_direct, PathwayReader, PathwayRecord};
pub use report::BatchReport;
pub use tables::{
    bundled_mechanisms, load_annotators, load_annotators_from_path, load_groupings,
    load_groupings_from_path, load_mechanisms, load_mechanisms_from_path, AnnotatorTable,
    BUNDLED_MECHANISMS,
};
