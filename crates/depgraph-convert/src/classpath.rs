//! Flat classpath of one configuration, read straight off the report.

use std::path::PathBuf;

use depgraph_core::report::ResolutionReport;
use depgraph_util::errors::DepgraphResult;
use indexmap::IndexSet;

use crate::ConvertOptions;

/// Local files of the download records under `configuration`, in report
/// order, without duplicates.
///
/// Records marked failed are left out unless `options.include_failed` is
/// set, so by default this is narrower than "every record's file". Records
/// without a local file never contribute. No graph is built. Fails if
/// `configuration` is not part of the report.
pub fn classpath(
    report: &ResolutionReport,
    configuration: &str,
    options: ConvertOptions,
) -> DepgraphResult<IndexSet<PathBuf>> {
    let configuration_report = report.require_configuration(configuration)?;
    let files: IndexSet<PathBuf> = configuration_report
        .artifacts
        .iter()
        .filter_map(|d| d.usable_file(options.include_failed))
        .map(|f| f.to_path_buf())
        .collect();
    tracing::debug!(
        "classpath for configuration {} has {} entries",
        configuration,
        files.len()
    );
    Ok(files)
}

/// Join files into a classpath string suitable for `-classpath`.
pub fn to_classpath_string<'a, I>(files: I) -> String
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    files
        .into_iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(classpath_separator())
}

fn classpath_separator() -> &'static str {
    if cfg!(windows) {
        ";"
    } else {
        ":"
    }
}
