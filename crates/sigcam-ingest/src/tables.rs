//! Reference table loaders
//!
//! Complex and family tables are `;`-delimited with a comma-separated member
//! list. The mechanism mapping and annotator tables are tab-delimited.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use sigcam_domain::{GroupingKind, GroupingTable, MechanismEntry, MechanismMapper};
use tracing::debug;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::record::normalize_header;

/// Mechanism mapping shipped with the crate
pub const BUNDLED_MECHANISMS: &str = include_str!("../resources/mechanism_go_mapping.tsv");

/// Curator name to identifier lookup
#[derive(Debug, Clone, Default)]
pub struct AnnotatorTable {
    by_name: HashMap<String, String>,
}

impl AnnotatorTable {
    /// Empty table; every annotator falls back to its raw name
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping
    pub fn insert(&mut self, name: impl Into<String>, identifier: impl Into<String>) {
        self.by_name.insert(name.into(), identifier.into());
    }

    /// Contributor for a raw annotator name
    ///
    /// Known names map to their identifier, unknown names are kept as-is
    /// and empty names yield no contributor.
    pub fn contributor(&self, name: Option<&str>) -> Option<String> {
        let name = name.map(str::trim).filter(|n| !n.is_empty())?;
        Some(
            self.by_name
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.to_string()),
        )
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True if the table is empty
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Load a complex or family table
pub fn load_groupings<R: Read>(
    input: R,
    kind: GroupingKind,
    config: &IngestConfig,
) -> Result<GroupingTable, IngestError> {
    let (table_name, name_column) = match kind {
        GroupingKind::Complex => ("complex table", "COMPLEX NAME"),
        GroupingKind::Family => ("family table", "PROT. FAMILY NAME"),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.grouping_delimiter_byte())
        .flexible(true)
        .from_reader(input);
    let headers = Headers::new(reader.headers()?, table_name);
    let id_col = headers.require("SIGNOR ID")?;
    let name_col = headers.require(name_column)?;
    let members_col = headers.require("LIST OF ENTITIES")?;

    let mut table = GroupingTable::new(kind);
    for row in reader.records() {
        let row = row?;
        let id = row.get(id_col).unwrap_or("");
        if id.trim().is_empty() {
            continue;
        }
        table.insert_row(
            id,
            row.get(name_col).unwrap_or(""),
            row.get(members_col).unwrap_or(""),
            &config.member_separator,
        )?;
    }

    debug!(table = table_name, groupings = table.len(), "Loaded grouping table");
    Ok(table)
}

/// Load a complex or family table from disk
pub fn load_groupings_from_path(
    path: impl AsRef<Path>,
    kind: GroupingKind,
    config: &IngestConfig,
) -> Result<GroupingTable, IngestError> {
    load_groupings(File::open(path)?, kind, config)
}

/// Load a mechanism mapping table
///
/// Columns `MECHANISM` and `GO_TERM` are required; `GO_LABEL` and
/// `CATALYTIC` are optional. An empty term keeps the label unmapped.
pub fn load_mechanisms<R: Read>(input: R) -> Result<MechanismMapper, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(input);
    let headers = Headers::new(reader.headers()?, "mechanism table");
    let label_col = headers.require("MECHANISM")?;
    let term_col = headers.require("GO_TERM")?;
    let term_label_col = headers.find("GO_LABEL");
    let catalytic_col = headers.find("CATALYTIC");

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim().to_string();
        let term = cell(term_col);
        let term_label = term_label_col.map(cell).filter(|l| !l.is_empty());
        let catalytic = catalytic_col
            .map(|i| matches!(cell(i).to_lowercase().as_str(), "yes" | "y" | "true" | "1"))
            .unwrap_or(false);

        entries.push(MechanismEntry {
            label: cell(label_col),
            term: if term.is_empty() { None } else { Some(term) },
            term_label,
            catalytic,
        });
    }

    let mapper = MechanismMapper::from_entries(entries)?;
    debug!(mechanisms = mapper.len(), "Loaded mechanism table");
    Ok(mapper)
}

/// Load a mechanism mapping table from disk
pub fn load_mechanisms_from_path(path: impl AsRef<Path>) -> Result<MechanismMapper, IngestError> {
    load_mechanisms(File::open(path)?)
}

/// The mechanism mapping shipped with the crate
pub fn bundled_mechanisms() -> Result<MechanismMapper, IngestError> {
    load_mechanisms(BUNDLED_MECHANISMS.as_bytes())
}

/// Load an annotator table (`NAME`, `IDENTIFIER`)
pub fn load_annotators<R: Read>(input: R) -> Result<AnnotatorTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(input);
    let headers = Headers::new(reader.headers()?, "annotator table");
    let name_col = headers.require("NAME")?;
    let id_col = headers.require("IDENTIFIER")?;

    let mut table = AnnotatorTable::new();
    for row in reader.records() {
        let row = row?;
        let name = row.get(name_col).unwrap_or("").trim();
        let id = row.get(id_col).unwrap_or("").trim();
        if !name.is_empty() && !id.is_empty() {
            table.insert(name, id);
        }
    }
    Ok(table)
}

/// Load an annotator table from disk
pub fn load_annotators_from_path(path: impl AsRef<Path>) -> Result<AnnotatorTable, IngestError> {
    load_annotators(File::open(path)?)
}

struct Headers {
    names: Vec<String>,
    table: &'static str,
}

impl Headers {
    fn new(record: &StringRecord, table: &'static str) -> Self {
        Self {
            names: record.iter().map(normalize_header).collect(),
            table,
        }
    }

    fn find(&self, column: &str) -> Option<usize> {
        self.names.iter().position(|h| h == column)
    }

    fn require(&self, column: &str) -> Result<usize, IngestError> {
        self.find(column).ok_or_else(|| IngestError::MissingColumn {
            table: self.table.to_string(),
            column: column.to_string(),
        })
    }
}
