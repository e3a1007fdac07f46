use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "upnotes",
    about = "Shows the upgrade notes relevant to the Composer packages you just updated",
    version,
    author
)]
pub struct Cli {
    /// Path to the Composer project directory (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub path: PathBuf,

    /// Configuration file (defaults to upnotes.toml in the project directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two lock files and report the packages updated between them
    Diff {
        /// composer.lock from before the update
        #[arg(value_name = "OLD_LOCK")]
        old_lock: PathBuf,

        /// composer.lock from after the update (defaults to the project's composer.lock)
        #[arg(value_name = "NEW_LOCK")]
        new_lock: Option<PathBuf>,
    },

    /// Report a single package update
    Show {
        /// Package name (vendor/name)
        #[arg(value_name = "PACKAGE")]
        package: String,

        /// Version installed before the update
        #[arg(long)]
        from: String,

        /// Version installed after the update
        #[arg(long)]
        to: String,
    },

    /// Print the lines of a notes file relevant when upgrading from a version
    Extract {
        /// Upgrade notes file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Version upgraded from
        #[arg(long)]
        from: String,
    },
}
