//! The resolution report produced by the external resolution engine.
//!
//! The report is read-only input: depgraph never mutates it. It is usually
//! materialized as a JSON or TOML document (see [`ResolutionReport::from_path`]).

use std::collections::HashMap;
use std::path::Path;

use depgraph_util::errors::{DepgraphError, DepgraphResult};
use depgraph_util::fs::{read_document, DocumentFormat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactDownload, ArtifactId};
use crate::module::ModuleId;

/// Whether a configuration can be pulled in by `*` from a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A configuration declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationDef {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl ConfigurationDef {
    pub fn new(name: &str, extends: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extends: extends.iter().map(|s| s.to_string()).collect(),
            visibility: Visibility::Public,
        }
    }
}

/// Anything that declares configurations with an `extends` hierarchy.
///
/// Implemented by report nodes and by the report itself, whose
/// configurations are those of the resolution root.
pub trait Configurations {
    /// Human-readable module coordinate, for error messages.
    fn describe(&self) -> String;

    /// The configurations `name` directly extends, or `None` if `name` is not declared.
    fn extends_of(&self, name: &str) -> Option<&[String]>;

    fn has_configuration(&self, name: &str) -> bool {
        self.extends_of(name).is_some()
    }
}

/// A directed "caller depends on node" edge, scoped to caller configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CallerEdge {
    pub caller: ModuleId,
    pub caller_configurations: Vec<String>,
    /// Raw dependency-configuration tokens per caller configuration.
    #[serde(default)]
    pub dependency_configurations: IndexMap<String, Vec<String>>,
    /// Explicit artifact selectors per caller configuration.
    #[serde(default)]
    pub artifacts: IndexMap<String, Vec<ArtifactId>>,
    /// Set by the engine when the caller is the synthetic resolution root.
    #[serde(default)]
    pub root: bool,
}

impl CallerEdge {
    /// Dependency-configuration tokens declared for one caller configuration.
    pub fn dependency_tokens(&self, caller_configuration: &str) -> &[String] {
        self.dependency_configurations
            .get(caller_configuration)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Artifact selectors declared for one caller configuration.
    pub fn selectors(&self, caller_configuration: &str) -> &[ArtifactId] {
        self.artifacts
            .get(caller_configuration)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One resolved module in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportNode {
    pub id: ModuleId,
    #[serde(default = "default_loaded")]
    pub loaded: bool,
    /// Root configurations in which this node lost a conflict.
    #[serde(default)]
    pub evicted_in: Vec<String>,
    #[serde(default)]
    pub configurations: Vec<ConfigurationDef>,
    /// Default artifacts the module publishes, per configuration.
    #[serde(default)]
    pub artifacts: IndexMap<String, Vec<ArtifactId>>,
    /// Inbound caller edges, per root configuration.
    #[serde(default)]
    pub callers: IndexMap<String, Vec<CallerEdge>>,
}

fn default_loaded() -> bool {
    true
}

impl ReportNode {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            loaded: true,
            evicted_in: Vec::new(),
            configurations: Vec::new(),
            artifacts: IndexMap::new(),
            callers: IndexMap::new(),
        }
    }

    /// Loaded and not evicted in `configuration`.
    pub fn is_resolved(&self, configuration: &str) -> bool {
        self.loaded && !self.evicted_in.iter().any(|c| c == configuration)
    }

    pub fn configuration(&self, name: &str) -> Option<&ConfigurationDef> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Public configurations in declaration order.
    pub fn public_configurations(&self) -> impl Iterator<Item = &str> {
        self.configurations
            .iter()
            .filter(|c| c.visibility == Visibility::Public)
            .map(|c| c.name.as_str())
    }

    /// Default artifacts declared for one configuration.
    pub fn declared_artifacts(&self, configuration: &str) -> &[ArtifactId] {
        self.artifacts
            .get(configuration)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Caller edges recorded under one root configuration.
    pub fn callers(&self, configuration: &str) -> &[CallerEdge] {
        self.callers
            .get(configuration)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Configurations for ReportNode {
    fn describe(&self) -> String {
        self.id.to_string()
    }

    fn extends_of(&self, name: &str) -> Option<&[String]> {
        self.configuration(name).map(|c| c.extends.as_slice())
    }
}

/// Download records for one root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationReport {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactDownload>,
}

/// The complete, already-resolved report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// The module that was resolved.
    pub root: ModuleId,
    /// Root configurations in report order.
    #[serde(default)]
    pub configurations: Vec<ConfigurationReport>,
    #[serde(default)]
    pub nodes: Vec<ReportNode>,
}

impl ResolutionReport {
    pub fn new(root: ModuleId) -> Self {
        Self {
            root,
            configurations: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Load a report from disk. `.json` files are parsed as JSON, anything else as TOML.
    pub fn from_path(path: &Path) -> DepgraphResult<Self> {
        let content = read_document(path)?;
        let report = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => Self::from_json_str(&content)?,
            DocumentFormat::Toml => Self::from_toml_str(&content)?,
        };
        tracing::debug!(
            "loaded report for {} with {} nodes and {} configurations",
            report.root,
            report.nodes.len(),
            report.configurations.len()
        );
        Ok(report)
    }

    pub fn from_json_str(content: &str) -> DepgraphResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            DepgraphError::Report {
                message: format!("Failed to parse JSON report: {e}"),
            }
            .into()
        })
    }

    pub fn from_toml_str(content: &str) -> DepgraphResult<Self> {
        toml::from_str(content).map_err(|e| {
            DepgraphError::Report {
                message: format!("Failed to parse TOML report: {e}"),
            }
            .into()
        })
    }

    pub fn configuration_names(&self) -> Vec<String> {
        self.configurations.iter().map(|c| c.name.clone()).collect()
    }

    pub fn configuration_report(&self, name: &str) -> Option<&ConfigurationReport> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Like [`Self::configuration_report`], failing with a missing-configuration error.
    pub fn require_configuration(&self, name: &str) -> Result<&ConfigurationReport, DepgraphError> {
        self.configuration_report(name)
            .ok_or_else(|| DepgraphError::MissingConfiguration {
                configuration: name.to_string(),
                available: self.configuration_names(),
            })
    }

    /// Look up a node by the engine's full identity.
    pub fn node(&self, id: &ModuleId) -> Option<&ReportNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Every download record for one module, across all configurations, in report order.
    pub fn downloads_for<'a>(
        &'a self,
        id: &'a ModuleId,
    ) -> impl Iterator<Item = &'a ArtifactDownload> + 'a {
        self.configurations
            .iter()
            .flat_map(|c| c.artifacts.iter())
            .filter(move |d| &d.module == id)
    }

    /// Build lookup tables for repeated node and download queries.
    pub fn index(&self) -> ReportIndex<'_> {
        ReportIndex::new(self)
    }

    /// Whether an edge originates at the synthetic resolution root.
    pub fn is_root_edge(&self, edge: &CallerEdge) -> bool {
        edge.root || edge.caller == self.root
    }
}

/// Node and download lookups over a report, keyed by engine identity.
///
/// Built once per conversion; the report itself only offers linear scans.
#[derive(Debug)]
pub struct ReportIndex<'a> {
    report: &'a ResolutionReport,
    nodes: HashMap<&'a ModuleId, &'a ReportNode>,
    downloads: HashMap<&'a ModuleId, Vec<&'a ArtifactDownload>>,
}

impl<'a> ReportIndex<'a> {
    pub fn new(report: &'a ResolutionReport) -> Self {
        let mut nodes = HashMap::new();
        for node in &report.nodes {
            nodes.entry(&node.id).or_insert(node);
        }
        let mut downloads: HashMap<&'a ModuleId, Vec<&'a ArtifactDownload>> = HashMap::new();
        for record in report.configurations.iter().flat_map(|c| c.artifacts.iter()) {
            downloads.entry(&record.module).or_default().push(record);
        }
        Self {
            report,
            nodes,
            downloads,
        }
    }

    pub fn report(&self) -> &'a ResolutionReport {
        self.report
    }

    /// Same as [`ResolutionReport::node`]. The first node wins on duplicate ids.
    pub fn node(&self, id: &ModuleId) -> Option<&'a ReportNode> {
        self.nodes.get(id).copied()
    }

    /// Same as [`ResolutionReport::downloads_for`], in report order.
    pub fn downloads_for(&self, id: &ModuleId) -> impl Iterator<Item = &'a ArtifactDownload> + '_ {
        self.downloads
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .copied()
    }
}

impl Configurations for ResolutionReport {
    fn describe(&self) -> String {
        self.root.to_string()
    }

    fn extends_of(&self, name: &str) -> Option<&[String]> {
        self.configuration_report(name).map(|c| c.extends.as_slice())
    }
}
