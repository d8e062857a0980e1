//! Edges command implementation.

use crate::cli::EdgesArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sigcam_store::{SqliteGraphStore, StoredEdge};

/// Execute the edges command.
pub fn execute_edges(args: EdgesArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let edges = list_edges(&args, config)?;
    println!("{}", formatter.format_edges(&edges)?);
    Ok(())
}

/// Read edges from the graph database, optionally by predicate.
pub fn list_edges(args: &EdgesArgs, config: &Config) -> Result<Vec<StoredEdge>> {
    let db = args.db.as_deref().unwrap_or(&config.paths.db);
    // Opening a missing path would create an empty database
    if !db.exists() {
        return Err(CliError::InvalidInput(format!("Database not found: {}", db.display())));
    }

    let store = SqliteGraphStore::new(db)?;
    let edges = match &args.predicate {
        Some(predicate) => store.edges_with_predicate(predicate)?,
        None => store.all_edges()?,
    };
    Ok(edges)
}
