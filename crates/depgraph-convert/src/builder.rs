//! Graph construction from a resolution report.
//!
//! Every resolved node of the report is converted by walking its caller
//! edges upwards: the callers' own graph nodes are converted first (and
//! memoized), then parent/child links and per-edge files are added between
//! the caller's nodes and this node's nodes. Each report node is converted
//! once per run, so every (module, configuration) pair maps to exactly one
//! graph node no matter how many paths lead to it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use depgraph_core::dependency::DeclaredDependency;
use depgraph_core::module::ModuleId;
use depgraph_core::report::{CallerEdge, ReportIndex, ReportNode, ResolutionReport};
use depgraph_util::errors::{DepgraphError, DepgraphResult};
use indexmap::{IndexMap, IndexSet};
use petgraph::graph::NodeIndex;

use crate::artifacts;
use crate::first_level::FirstLevelIndex;
use crate::graph::{GraphNode, ResolvedGraph};
use crate::hierarchy::{self, ClosureCache};
use crate::ConvertOptions;

/// Graph nodes of one report node, keyed by configuration.
pub type NodeMap = IndexMap<String, NodeIndex>;

/// The output of converting one configuration of a report.
#[derive(Debug)]
pub struct Conversion {
    pub configuration: String,
    pub graph: ResolvedGraph,
    /// Graph nodes each declared first-level dependency resolved to.
    pub first_level: IndexMap<DeclaredDependency, IndexSet<NodeIndex>>,
}

impl Conversion {
    /// Graph nodes a declared dependency resolved to (empty if none).
    pub fn resolved(&self, declared: &DeclaredDependency) -> Vec<&GraphNode> {
        self.first_level
            .get(declared)
            .map(|nodes| nodes.iter().map(|&idx| self.graph.node(idx)).collect())
            .unwrap_or_default()
    }

    /// Every file reachable from the declared first-level dependencies.
    pub fn files(&self) -> IndexSet<PathBuf> {
        self.graph
            .collect_files(self.first_level.values().flatten().copied())
    }
}

/// Conversion state of a report node.
#[derive(Debug, Clone)]
enum NodeState {
    /// Its callers are being converted.
    InProgress,
    Done(NodeMap),
}

/// Convert `configuration` of `report` into a graph.
///
/// Fails when the configuration is not part of the report or when the report
/// is structurally inconsistent. Nothing is skipped silently.
pub fn convert(
    report: &ResolutionReport,
    configuration: &str,
    declared: &[DeclaredDependency],
    options: ConvertOptions,
) -> DepgraphResult<Conversion> {
    let started = Instant::now();
    report.require_configuration(configuration)?;

    let mut builder = GraphBuilder::new(report, configuration, declared, options)?;
    for node in &report.nodes {
        if !node.is_resolved(configuration) {
            tracing::trace!("skipping {} (not loaded or evicted)", node.id);
            continue;
        }
        builder.visit(node)?;
    }
    let conversion = builder.finish();

    tracing::debug!(
        "translating report for configuration {} took {:?} ({} nodes)",
        configuration,
        started.elapsed(),
        conversion.graph.len()
    );
    Ok(conversion)
}

/// Memoizing converter for one configuration of one report.
///
/// A builder owns its node cache; convert different configurations with
/// different builders.
pub struct GraphBuilder<'a> {
    report: &'a ResolutionReport,
    index: ReportIndex<'a>,
    configuration: &'a str,
    options: ConvertOptions,
    graph: ResolvedGraph,
    nodes: HashMap<ModuleId, NodeState>,
    closures: ClosureCache,
    declared: FirstLevelIndex,
    first_level: IndexMap<DeclaredDependency, IndexSet<NodeIndex>>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        report: &'a ResolutionReport,
        configuration: &'a str,
        declared: &[DeclaredDependency],
        options: ConvertOptions,
    ) -> DepgraphResult<Self> {
        let mut closures = ClosureCache::new();
        let root = GraphNode::new(
            report.root.clone(),
            configuration,
            closures.closure(report, configuration)?,
            Default::default(),
        );
        Ok(Self {
            report,
            index: report.index(),
            configuration,
            options,
            graph: ResolvedGraph::new(root),
            nodes: HashMap::new(),
            closures,
            declared: FirstLevelIndex::new(declared),
            first_level: IndexMap::new(),
        })
    }

    /// Convert one report node (and, transitively, its callers).
    ///
    /// Returns the node's graph nodes by configuration. A node whose caller
    /// chain leads back to itself is rejected, and so is a graph node that
    /// ends up with neither a parent nor a root entry.
    pub fn visit(&mut self, node: &'a ReportNode) -> Result<NodeMap, DepgraphError> {
        match self.nodes.get(&node.id) {
            Some(NodeState::Done(map)) => return Ok(map.clone()),
            Some(NodeState::InProgress) => {
                return Err(DepgraphError::CyclicCallers {
                    module: node.id.to_string(),
                    configuration: self.configuration.to_string(),
                })
            }
            None => {}
        }
        self.nodes.insert(node.id.clone(), NodeState::InProgress);
        let report = self.report;

        let mut by_configuration = NodeMap::new();
        let mut unlinked: IndexMap<String, String> = IndexMap::new();
        for edge in node.callers(self.configuration) {
            let dependency_configurations =
                hierarchy::dependency_configurations(node, edge, self.configuration)?;
            for dependency_configuration in &dependency_configurations {
                if !by_configuration.contains_key(dependency_configuration) {
                    let idx = self.create_node(node, dependency_configuration)?;
                    by_configuration.insert(dependency_configuration.clone(), idx);
                }
            }

            if report.is_root_edge(edge) {
                let files = artifacts::edge_files(
                    &self.index,
                    report,
                    self.configuration,
                    edge,
                    &node.id,
                    &mut self.closures,
                    self.options,
                )?;
                for dependency_configuration in &dependency_configurations {
                    let child = by_configuration[dependency_configuration.as_str()];
                    tracing::trace!("linking {} under root", self.graph.node(child));
                    self.graph.link(None, child, files.clone());
                }
                continue;
            }

            let caller = self.index.node(&edge.caller).ok_or_else(|| {
                DepgraphError::Structural {
                    module: node.id.to_string(),
                    configuration: self.configuration.to_string(),
                    message: format!("caller {} is not part of the report", edge.caller),
                }
            })?;
            let parents = self.visit(caller)?;
            self.link_callers(
                node,
                caller,
                edge,
                &dependency_configurations,
                &by_configuration,
                &parents,
                &mut unlinked,
            )?;
        }

        for (dependency_configuration, &idx) in &by_configuration {
            if self.graph.parents(idx).is_empty() {
                return Err(DepgraphError::Structural {
                    module: node.id.to_string(),
                    configuration: dependency_configuration.clone(),
                    message: unlinked
                        .get(dependency_configuration)
                        .cloned()
                        .unwrap_or_else(|| "no caller edge links this configuration".to_string()),
                });
            }
        }

        self.nodes
            .insert(node.id.clone(), NodeState::Done(by_configuration.clone()));
        Ok(by_configuration)
    }

    /// Link this node's graph nodes under the caller's graph nodes whose
    /// closures contain a caller configuration of `edge`.
    ///
    /// Dependency configurations no caller graph node accepts are recorded in
    /// `unlinked`; another edge may still link them.
    #[allow(clippy::too_many_arguments)]
    fn link_callers(
        &mut self,
        node: &ReportNode,
        caller: &ReportNode,
        edge: &CallerEdge,
        dependency_configurations: &IndexSet<String>,
        by_configuration: &NodeMap,
        parents: &NodeMap,
        unlinked: &mut IndexMap<String, String>,
    ) -> Result<(), DepgraphError> {
        for dependency_configuration in dependency_configurations {
            let caller_configurations = hierarchy::caller_configurations_for(
                node,
                edge,
                dependency_configuration,
                self.configuration,
            )?;
            let mut matching = IndexSet::new();
            for caller_configuration in &caller_configurations {
                for &parent in parents.values() {
                    if self
                        .graph
                        .node(parent)
                        .contains_configuration(caller_configuration)
                    {
                        matching.insert(parent);
                    }
                }
            }

            if matching.is_empty() {
                tracing::trace!(
                    "{} ({}) has no graph node for caller configurations {:?}",
                    caller.id,
                    dependency_configuration,
                    caller_configurations
                );
                unlinked.insert(
                    dependency_configuration.clone(),
                    format!(
                        "caller {} links through [{}] but none of its graph nodes contain them",
                        edge.caller,
                        caller_configurations
                            .iter()
                            .map(String::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                );
                continue;
            }

            let child = by_configuration[dependency_configuration.as_str()];
            for parent in matching {
                let parent_configuration = self.graph.node(parent).configuration.clone();
                let files = artifacts::edge_files(
                    &self.index,
                    caller,
                    &parent_configuration,
                    edge,
                    &node.id,
                    &mut self.closures,
                    self.options,
                )?;
                tracing::trace!(
                    "linking {} under {}",
                    self.graph.node(child),
                    self.graph.node(parent)
                );
                self.graph.link(Some(parent), child, files);
            }
        }
        Ok(())
    }

    fn create_node(
        &mut self,
        node: &ReportNode,
        configuration: &str,
    ) -> Result<NodeIndex, DepgraphError> {
        let closure = self.closures.closure(node, configuration)?;
        let files = artifacts::node_files(&self.index, node, &closure, self.options);
        let idx = self
            .graph
            .add_node(GraphNode::new(node.id.clone(), configuration, closure, files));
        tracing::trace!("created {}", self.graph.node(idx));

        if let Some(declared) = self.declared.lookup(&node.id, configuration) {
            self.first_level
                .entry(declared.clone())
                .or_default()
                .insert(idx);
        }
        Ok(idx)
    }

    /// Finish the run, handing over the graph and the first-level mapping.
    pub fn finish(self) -> Conversion {
        Conversion {
            configuration: self.configuration.to_string(),
            graph: self.graph,
            first_level: self.first_level,
        }
    }
}
