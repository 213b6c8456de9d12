//! Handler for `depgraph why`.

use std::path::Path;

use depgraph_convert::builder::convert;
use depgraph_convert::ConvertOptions;
use depgraph_core::config::Config;
use miette::Result;

pub fn exec(
    report: &Path,
    target: &str,
    configuration: Option<&str>,
    config: &Config,
) -> Result<()> {
    let (report, configuration) = super::load(report, configuration, config)?;
    let conversion = convert(
        &report,
        configuration,
        &config.dependencies,
        ConvertOptions::from(&config.convert),
    )?;

    match conversion.graph.find_path(target) {
        Some(path) => {
            println!("Path to {target}:");
            for (i, node) in path.iter().enumerate() {
                let indent = "  ".repeat(i);
                println!("{indent}{node}");
            }
        }
        None => println!("Module '{target}' not found in the graph."),
    }
    Ok(())
}
