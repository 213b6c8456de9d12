//! Handler for `depgraph tree`.

use std::path::Path;

use depgraph_convert::builder::convert;
use depgraph_convert::ConvertOptions;
use depgraph_core::config::Config;
use depgraph_util::progress::{self, Status};
use miette::Result;

pub fn exec(
    report: &Path,
    configuration: Option<&str>,
    depth: Option<usize>,
    files: bool,
    edge_files: bool,
    config: &Config,
) -> Result<()> {
    let (report, configuration) = super::load(report, configuration, config)?;
    let conversion = convert(
        &report,
        configuration,
        &config.dependencies,
        ConvertOptions::from(&config.convert),
    )?;

    if conversion.graph.is_empty() {
        println!("No dependencies.");
    } else {
        print!("{}", conversion.graph.print_tree(depth, edge_files));
    }

    for declared in &config.dependencies {
        let resolved = conversion.resolved(declared);
        if resolved.is_empty() {
            progress::report(Status::Warn, "Unresolved", &declared.to_string());
            continue;
        }
        if files {
            for node in resolved {
                println!("{node}:");
                for file in &node.files {
                    println!("  {}", file.display());
                }
            }
        }
    }
    Ok(())
}
