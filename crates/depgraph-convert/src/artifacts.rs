//! Artifact file attribution.
//!
//! Two selection rules exist. A graph node's own files come from the default
//! artifacts its module declares for every configuration in the node's
//! closure. The files attributed to a single caller edge come from the
//! artifact selectors that caller listed on the edge, for every configuration
//! in the caller's closure. Both rules keep report order and deduplicate by
//! file path.

use std::collections::BTreeSet;
use std::path::PathBuf;

use depgraph_core::artifact::ArtifactId;
use depgraph_core::module::ModuleId;
use depgraph_core::report::{CallerEdge, Configurations, ReportIndex, ReportNode};
use depgraph_util::errors::DepgraphError;
use indexmap::IndexSet;

use crate::hierarchy::ClosureCache;
use crate::ConvertOptions;

/// Exact selector match on name, extension, type and extra attributes.
pub fn selector_matches(selector: &ArtifactId, artifact: &ArtifactId) -> bool {
    selector.name == artifact.name
        && selector.ext == artifact.ext
        && selector.kind == artifact.kind
        && selector.extra == artifact.extra
}

/// Files of the default artifacts `node` declares across `closure`.
pub fn node_files(
    index: &ReportIndex<'_>,
    node: &ReportNode,
    closure: &BTreeSet<String>,
    options: ConvertOptions,
) -> IndexSet<PathBuf> {
    let declared: IndexSet<&ArtifactId> = closure
        .iter()
        .flat_map(|c| node.declared_artifacts(c))
        .collect();

    index
        .downloads_for(&node.id)
        .filter(|d| declared.contains(&d.artifact))
        .filter_map(|d| d.usable_file(options.include_failed))
        .map(|f| f.to_path_buf())
        .collect()
}

/// Files attributable to one caller edge.
///
/// `caller` is the calling module (the report itself for root edges) and
/// `caller_configuration` the configuration of the parent graph node; its
/// closure on `caller` decides which of the edge's selectors apply.
/// Selectors that match nothing contribute nothing.
pub fn edge_files<C>(
    index: &ReportIndex<'_>,
    caller: &C,
    caller_configuration: &str,
    edge: &CallerEdge,
    dependency: &ModuleId,
    closures: &mut ClosureCache,
    options: ConvertOptions,
) -> Result<IndexSet<PathBuf>, DepgraphError>
where
    C: Configurations + ?Sized,
{
    let closure = closures.closure(caller, caller_configuration)?;
    let selectors: IndexSet<&ArtifactId> =
        closure.iter().flat_map(|c| edge.selectors(c)).collect();
    if selectors.is_empty() {
        return Ok(IndexSet::new());
    }

    let mut files = IndexSet::new();
    let mut matched = vec![false; selectors.len()];
    for download in index.downloads_for(dependency) {
        for (i, selector) in selectors.iter().enumerate() {
            if selector_matches(selector, &download.artifact) {
                matched[i] = true;
                if let Some(file) = download.usable_file(options.include_failed) {
                    files.insert(file.to_path_buf());
                }
            }
        }
    }

    for (selector, _) in selectors.iter().zip(&matched).filter(|(_, m)| !**m) {
        tracing::trace!(
            "selector {}.{} ({}) on {} -> {} matched no downloaded artifact",
            selector.name,
            selector.ext,
            selector.kind,
            edge.caller,
            dependency
        );
    }

    Ok(files)
}
