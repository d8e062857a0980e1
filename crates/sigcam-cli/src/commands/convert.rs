//! Convert command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::ConvertArgs;
use crate::commands::load_mapper;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sigcam_domain::{GroupingKind, GroupingTable, ReferenceData};
use sigcam_ingest::{
    load_annotators_from_path, load_groupings_from_path, AnnotatorTable, BatchReport, Importer,
    IngestConfig,
};
use sigcam_store::SqliteGraphStore;
use tracing::info;

/// Execute the convert command.
pub fn execute_convert(args: ConvertArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = convert(&args, config)?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

/// Load the reference tables, import the pathway file and write the graph.
pub fn convert(args: &ConvertArgs, config: &Config) -> Result<BatchReport> {
    if !args.input.exists() {
        return Err(CliError::InvalidInput(format!(
            "Pathway file not found: {}",
            args.input.display()
        )));
    }

    let ingest = &config.ingest;
    let complexes = pick(&args.complexes, &config.paths.complexes);
    let families = pick(&args.families, &config.paths.families);
    let reference = ReferenceData::new(
        load_table(complexes, GroupingKind::Complex, ingest)?,
        load_table(families, GroupingKind::Family, ingest)?,
    );

    let mapper = load_mapper(pick(&args.mechanisms, &config.paths.mechanisms))?;
    let annotators = match pick(&args.annotators, &config.paths.annotators) {
        Some(path) => load_annotators_from_path(path)?,
        None => AnnotatorTable::new(),
    };
    info!(
        complexes = reference.complexes.len(),
        families = reference.families.len(),
        mechanisms = mapper.len(),
        annotators = annotators.len(),
        "Reference tables loaded"
    );

    let importer = Importer::new(
        Arc::new(reference),
        Arc::new(mapper),
        Arc::new(annotators),
        ingest.clone(),
    )?;

    let db = args.db.as_deref().unwrap_or(&config.paths.db);
    let mut store = SqliteGraphStore::new(db)?;
    let report = importer.import_path(&args.input, &mut store)?;
    info!(
        db = %db.display(),
        nodes = store.node_count()?,
        edges = store.edge_count()?,
        "Graph written"
    );
    Ok(report)
}

fn pick<'a>(flag: &'a Option<PathBuf>, configured: &'a Option<PathBuf>) -> Option<&'a Path> {
    flag.as_deref().or(configured.as_deref())
}

fn load_table(path: Option<&Path>, kind: GroupingKind, config: &IngestConfig) -> Result<GroupingTable> {
    match path {
        Some(path) => Ok(load_groupings_from_path(path, kind, config)?),
        None => Ok(GroupingTable::new(kind)),
    }
}
