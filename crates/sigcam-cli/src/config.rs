//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sigcam_ingest::IngestConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default locations of input tables and the output database
    #[serde(default)]
    pub paths: Paths,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Ingestion settings
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Default file locations; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paths {
    /// Complex table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexes: Option<PathBuf>,

    /// Protein family table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub families: Option<PathBuf>,

    /// Mechanism mapping table; the bundled table is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanisms: Option<PathBuf>,

    /// Annotator table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotators: Option<PathBuf>,

    /// Graph database
    #[serde(default = "default_db")]
    pub db: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sigcam").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.ingest.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            complexes: None,
            families: None,
            mechanisms: None,
            annotators: None,
            db: default_db(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_db() -> PathBuf {
    PathBuf::from("sigcam.db")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
