//! Sigcam CLI - Command-line interface for the pathway to activity-graph converter.

use clap::Parser;
use sigcam_cli::commands;
use sigcam_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> sigcam_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr); RUST_LOG overrides -v / -q
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Convert(args) => commands::execute_convert(args, &config, &formatter),
        Command::Mechanisms(args) => commands::execute_mechanisms(args, &config, &formatter),
        Command::Edges(args) => commands::execute_edges(args, &config, &formatter),
    }
}
