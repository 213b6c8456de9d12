//! Command dispatch and handler modules.

mod check;
mod classpath;
mod tree;
mod why;

use std::path::Path;

use depgraph_core::config::Config;
use depgraph_core::report::ResolutionReport;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Classpath {
            report,
            configuration,
            lines,
        } => classpath::exec(&report, configuration.as_deref(), lines, &config),
        Command::Tree {
            report,
            configuration,
            depth,
            files,
            edge_files,
        } => tree::exec(
            &report,
            configuration.as_deref(),
            depth,
            files,
            edge_files,
            &config,
        ),
        Command::Why {
            report,
            target,
            configuration,
        } => why::exec(&report, &target, configuration.as_deref(), &config),
        Command::Check { report } => check::exec(&report, &config, cli.verbose),
    }
}

/// Load a report and pick the configuration to work on: the command-line
/// value wins over `[convert] configuration`.
fn load<'a>(
    report: &Path,
    configuration: Option<&'a str>,
    config: &'a Config,
) -> Result<(ResolutionReport, &'a str)> {
    let report = ResolutionReport::from_path(report)?;
    let configuration = configuration.unwrap_or(&config.convert.configuration);
    Ok((report, configuration))
}
