//! Mechanisms command implementation.

use crate::cli::MechanismsArgs;
use crate::commands::load_mapper;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the mechanisms command.
pub fn execute_mechanisms(args: MechanismsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args.mechanisms.as_deref().or(config.paths.mechanisms.as_deref());
    let mapper = load_mapper(path)?;
    println!("{}", formatter.format_mechanisms(&mapper)?);
    Ok(())
}
