//! CLI argument definitions for depgraph.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depgraph",
    version,
    about = "Turn dependency resolution reports into navigable graphs",
    long_about = "depgraph reads the report of an external dependency resolver and rebuilds \
                  a rooted, configuration-aware dependency graph with per-edge artifact files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to depgraph.toml (defaults to ./depgraph.toml if present)
    #[arg(long, global = true, env = "DEPGRAPH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the flat classpath of one configuration
    Classpath {
        /// Resolution report (.json or .toml)
        report: PathBuf,
        /// Configuration to read
        #[arg(short, long)]
        configuration: Option<String>,
        /// Print one file per line instead of a joined classpath
        #[arg(long)]
        lines: bool,
    },

    /// Display the converted dependency graph
    Tree {
        /// Resolution report (.json or .toml)
        report: PathBuf,
        /// Configuration to convert
        #[arg(short, long)]
        configuration: Option<String>,
        /// Maximum tree depth to display
        #[arg(long)]
        depth: Option<usize>,
        /// Also list the files attributed to each first-level request
        #[arg(long)]
        files: bool,
        /// List the files each parent pulls in under every tree entry
        #[arg(long)]
        edge_files: bool,
    },

    /// Show how a module is reached from the root
    Why {
        /// Resolution report (.json or .toml)
        report: PathBuf,
        /// Module as `group:name` or `name`
        target: String,
        /// Configuration to convert
        #[arg(short, long)]
        configuration: Option<String>,
    },

    /// Convert every configuration of a report and report inconsistencies
    Check {
        /// Resolution report (.json or .toml)
        report: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
