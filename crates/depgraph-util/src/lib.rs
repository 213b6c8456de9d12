//! Shared utilities for depgraph.
//!
//! This crate provides the cross-cutting concerns used by the other depgraph
//! crates: the unified error type, filesystem helpers for loading reports
//! and configuration, and terminal status lines.

pub mod errors;
pub mod fs;
pub mod progress;
