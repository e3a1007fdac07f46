mod agents;
mod cli;
mod composer;
mod config;
mod error;
mod output;
mod repository;
mod utils;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "UPNOTES_LOG";

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Diff { old_lock, new_lock } => {
            workflow::execute_diff(&cli.path, config, old_lock, new_lock.as_deref())
        }
        Commands::Show { package, from, to } => {
            workflow::execute_show(&cli.path, config, package, from, to)
        }
        Commands::Extract { file, from } => {
            workflow::execute_extract(&cli.path, config, file, from)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
