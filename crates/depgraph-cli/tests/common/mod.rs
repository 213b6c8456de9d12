#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use depgraph_core::artifact::{ArtifactDownload, ArtifactId, DownloadStatus};
use depgraph_core::module::ModuleId;
use depgraph_core::report::{
    CallerEdge, ConfigurationDef, ConfigurationReport, ReportNode, ResolutionReport,
};
use indexmap::IndexMap;

pub fn depgraph_cmd() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("depgraph").unwrap()
}

fn id(name: &str) -> ModuleId {
    ModuleId::new(&format!("org.{name}"), name, "1.0")
}

fn jar(name: &str) -> ArtifactId {
    ArtifactId::new(name, "jar", "jar")
}

fn edge(caller: Option<&str>) -> CallerEdge {
    let mut dependency_configurations = IndexMap::new();
    dependency_configurations.insert("default".to_string(), vec!["default".to_string()]);
    CallerEdge {
        caller: caller.map(id).unwrap_or_else(|| id("app")),
        caller_configurations: vec!["default".to_string()],
        dependency_configurations,
        artifacts: IndexMap::new(),
        root: caller.is_none(),
    }
}

fn node(name: &str, caller: Option<&str>) -> ReportNode {
    let mut node = ReportNode::new(id(name));
    node.configurations = vec![ConfigurationDef::new("default", &[])];
    node.artifacts.insert("default".to_string(), vec![jar(name)]);
    let mut edge = edge(caller);
    if caller.is_some() {
        edge.artifacts.insert("default".to_string(), vec![jar(name)]);
    }
    node.callers.insert("default".to_string(), vec![edge]);
    node
}

fn download(name: &str, root: &Path) -> ArtifactDownload {
    ArtifactDownload {
        module: id(name),
        artifact: jar(name),
        local_file: Some(root.join(format!("{name}-1.0.jar"))),
        status: DownloadStatus::Successful,
    }
}

/// Report for `org.app:app:1.0` where the root depends on `lib` which
/// depends on `util`. `test` extends `default` and has no nodes of its own.
pub fn sample_report(repo: &Path) -> ResolutionReport {
    let mut report = ResolutionReport::new(id("app"));
    report.configurations = vec![
        ConfigurationReport {
            name: "default".to_string(),
            extends: Vec::new(),
            artifacts: vec![download("lib", repo), download("util", repo)],
        },
        ConfigurationReport {
            name: "test".to_string(),
            extends: vec!["default".to_string()],
            artifacts: Vec::new(),
        },
    ];
    report.nodes = vec![node("lib", None), node("util", Some("lib"))];
    report
}

/// Write the sample report as JSON into `dir` and return its path.
pub fn write_report(dir: &Path) -> PathBuf {
    let report = sample_report(&dir.join("repo"));
    let path = dir.join("report.json");
    std::fs::write(&path, serde_json::to_string_pretty(&report).unwrap()).unwrap();
    path
}
