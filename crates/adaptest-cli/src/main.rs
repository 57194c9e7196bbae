//! Adaptest CLI: the `adaptest` command.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Resolve { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Resolve {
            config,
            json,
            verbose: _,
        } => commands::resolve::run(config, json),

        Commands::Ingredients { config, json } => commands::ingredients::run(config, json),
    }
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
