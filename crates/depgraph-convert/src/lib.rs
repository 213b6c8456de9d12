//! Resolution report conversion.
//!
//! Turns the flat report of an external resolution engine into a rooted,
//! configuration-aware dependency graph: one node per (module, configuration)
//! pair, parent/child links that survive diamonds, and the artifact files
//! attributable to each individual edge. The flat classpath of a single
//! configuration can be read directly off the report as well.
//!
//! Everything here is a synchronous, in-memory transformation. The report is
//! never mutated.

pub mod artifacts;
pub mod builder;
pub mod classpath;
pub mod first_level;
pub mod graph;
pub mod hierarchy;

/// Knobs shared by the graph builder and the classpath extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Let failed download records that still carry a local file contribute.
    pub include_failed: bool,
}

impl From<&depgraph_core::config::ConvertConfig> for ConvertOptions {
    fn from(config: &depgraph_core::config::ConvertConfig) -> Self {
        Self {
            include_failed: config.include_failed,
        }
    }
}
