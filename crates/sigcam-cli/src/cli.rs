//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Sigcam CLI - Convert causal-interaction pathway files into activity graphs.
#[derive(Debug, Parser)]
#[command(name = "sigcam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SIGCAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log filter directive implied by `-v` / `-q`
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (keys only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import one pathway file into a graph database
    Convert(ConvertArgs),

    /// List the mechanism mapping
    Mechanisms(MechanismsArgs),

    /// List stored edges
    Edges(EdgesArgs),
}

/// Arguments for the convert command.
#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Pathway file (tab-separated, with header)
    pub input: PathBuf,

    /// Complex table
    #[arg(long)]
    pub complexes: Option<PathBuf>,

    /// Protein family table
    #[arg(long)]
    pub families: Option<PathBuf>,

    /// Mechanism mapping table (defaults to the bundled one)
    #[arg(long)]
    pub mechanisms: Option<PathBuf>,

    /// Annotator table
    #[arg(long)]
    pub annotators: Option<PathBuf>,

    /// Output database (defaults to the configured path)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Arguments for the mechanisms command.
#[derive(Debug, Parser)]
pub struct MechanismsArgs {
    /// Mechanism mapping table (defaults to the bundled one)
    #[arg(long)]
    pub mechanisms: Option<PathBuf>,
}

/// Arguments for the edges command.
#[derive(Debug, Parser)]
pub struct EdgesArgs {
    /// Graph database
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Only edges with this predicate (e.g. RO:0002629)
    #[arg(short, long)]
    pub predicate: Option<String>,
}
