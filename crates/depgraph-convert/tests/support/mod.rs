//! Report fixtures shared by the conversion tests.

#![allow(dead_code)]

use std::path::PathBuf;

use depgraph_core::artifact::{ArtifactDownload, ArtifactId, DownloadStatus};
use depgraph_core::module::ModuleId;
use depgraph_core::report::{
    CallerEdge, ConfigurationDef, ConfigurationReport, ReportNode, ResolutionReport,
};
use indexmap::{IndexMap, IndexSet};

pub fn root_id() -> ModuleId {
    ModuleId::new("com.example", "app", "1.0")
}

pub fn id(name: &str) -> ModuleId {
    ModuleId::new(&format!("org.{name}"), name, "1.0")
}

pub fn jar(name: &str) -> ArtifactId {
    ArtifactId::new(name, "jar", "jar")
}

pub fn sources(name: &str) -> ArtifactId {
    ArtifactId::new(name, "source", "jar").with_extra("classifier", "sources")
}

pub fn files(paths: &[&str]) -> IndexSet<PathBuf> {
    paths.iter().map(PathBuf::from).collect()
}

/// A report whose root declares `configurations` as `(name, extends)`.
pub fn report(configurations: &[(&str, &[&str])]) -> ResolutionReport {
    let mut report = ResolutionReport::new(root_id());
    for (name, extends) in configurations {
        report.configurations.push(ConfigurationReport {
            name: name.to_string(),
            extends: extends.iter().map(|s| s.to_string()).collect(),
            artifacts: Vec::new(),
        });
    }
    report
}

/// A node declaring `configurations` as `(name, extends)`.
pub fn node(name: &str, configurations: &[(&str, &[&str])]) -> ReportNode {
    let mut node = ReportNode::new(id(name));
    for (conf, extends) in configurations {
        node.configurations.push(ConfigurationDef::new(conf, extends));
    }
    node
}

/// An edge from `caller` (`None` = root) with `(caller conf, dependency tokens)` mappings.
pub fn edge(caller: Option<&str>, mapping: &[(&str, &[&str])]) -> CallerEdge {
    let mut dependency_configurations = IndexMap::new();
    for (conf, tokens) in mapping {
        dependency_configurations.insert(
            conf.to_string(),
            tokens.iter().map(|s| s.to_string()).collect(),
        );
    }
    CallerEdge {
        caller: caller.map(id).unwrap_or_else(root_id),
        caller_configurations: mapping.iter().map(|(c, _)| c.to_string()).collect(),
        dependency_configurations,
        artifacts: IndexMap::new(),
        root: caller.is_none(),
    }
}

/// Add an explicit artifact selector for one caller configuration.
pub fn select(mut edge: CallerEdge, caller_configuration: &str, artifact: ArtifactId) -> CallerEdge {
    edge.artifacts
        .entry(caller_configuration.to_string())
        .or_default()
        .push(artifact);
    edge
}

/// Declare a default artifact of `node` in `configuration`.
pub fn publish(node: &mut ReportNode, configuration: &str, artifact: ArtifactId) {
    node.artifacts
        .entry(configuration.to_string())
        .or_default()
        .push(artifact);
}

/// Record a successful download under a root configuration.
pub fn download(
    report: &mut ResolutionReport,
    configuration: &str,
    module: &str,
    artifact: ArtifactId,
    file: &str,
) {
    download_with_status(
        report,
        configuration,
        module,
        artifact,
        file,
        DownloadStatus::Successful,
    );
}

pub fn download_with_status(
    report: &mut ResolutionReport,
    configuration: &str,
    module: &str,
    artifact: ArtifactId,
    file: &str,
    status: DownloadStatus,
) {
    let conf = report
        .configurations
        .iter_mut()
        .find(|c| c.name == configuration)
        .expect("configuration declared in fixture");
    conf.artifacts.push(ArtifactDownload {
        module: id(module),
        artifact,
        local_file: Some(PathBuf::from(file)),
        status,
    });
}

/// Register `edge` as a caller of `node` under root configuration `configuration`.
pub fn called_by(node: &mut ReportNode, configuration: &str, edge: CallerEdge) {
    node.callers
        .entry(configuration.to_string())
        .or_default()
        .push(edge);
}
