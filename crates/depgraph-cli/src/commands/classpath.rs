//! Handler for `depgraph classpath`.

use std::path::Path;

use depgraph_convert::classpath::{classpath, to_classpath_string};
use depgraph_convert::ConvertOptions;
use depgraph_core::config::Config;
use miette::Result;

pub fn exec(
    report: &Path,
    configuration: Option<&str>,
    lines: bool,
    config: &Config,
) -> Result<()> {
    let (report, configuration) = super::load(report, configuration, config)?;
    let files = classpath(&report, configuration, ConvertOptions::from(&config.convert))?;

    if lines {
        for file in &files {
            println!("{}", file.display());
        }
    } else {
        println!("{}", to_classpath_string(&files));
    }
    Ok(())
}
