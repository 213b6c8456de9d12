//! Core data types for depgraph.
//!
//! This crate defines the resolution report handed over by an external
//! resolution engine (nodes, caller edges, downloaded artifacts), the two
//! module identity models, user-declared first-level dependencies, and the
//! `depgraph.toml` configuration.
//!
//! This crate is intentionally free of conversion logic and network I/O.

/// Configuration converted when neither the CLI nor `depgraph.toml` names one.
pub const DEFAULT_CONFIGURATION: &str = "default";

pub mod artifact;
pub mod config;
pub mod dependency;
pub mod module;
pub mod report;
