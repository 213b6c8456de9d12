//! Handler for `depgraph check`.

use std::path::Path;

use depgraph_convert::builder::convert;
use depgraph_convert::ConvertOptions;
use depgraph_core::config::Config;
use depgraph_core::report::ResolutionReport;
use depgraph_util::progress::{self, Status};
use miette::Result;

/// Convert every configuration of the report. The first failure aborts.
pub fn exec(report_path: &Path, config: &Config, verbose: bool) -> Result<()> {
    let report = ResolutionReport::from_path(report_path)?;
    let options = ConvertOptions::from(&config.convert);

    for configuration in report.configuration_names() {
        if verbose {
            progress::report(Status::Info, "Converting", &configuration);
        }
        let conversion = convert(&report, &configuration, &config.dependencies, options)?;
        progress::report(
            Status::Done,
            "Checked",
            &format!("{configuration} ({} nodes)", conversion.graph.len()),
        );
    }
    Ok(())
}
