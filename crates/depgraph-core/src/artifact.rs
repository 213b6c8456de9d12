//! Artifact identities and download records.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::module::ModuleId;

/// Identity of a module artifact: name, type, extension and extra attributes.
///
/// The same tuple is used for a module's declared artifacts, for the
/// artifact selectors on caller edges, and for download records, so matching
/// is plain value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId {
    pub name: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_kind")]
    pub ext: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

fn default_kind() -> String {
    "jar".to_string()
}

impl ArtifactId {
    pub fn new(name: &str, kind: &str, ext: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            ext: ext.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Add an extra attribute (e.g. `classifier`).
    pub fn with_extra(mut self, key: &str, value: &str) -> Self {
        self.extra.insert(key.to_string(), value.to_string());
        self
    }
}

/// Outcome of fetching one artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Downloaded during this resolution.
    #[default]
    Successful,
    /// Already in the local cache, nothing downloaded.
    No,
    /// The download failed.
    Failed,
}

/// A downloaded-artifact record from the resolution report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtifactDownload {
    pub module: ModuleId,
    pub artifact: ArtifactId,
    #[serde(default)]
    pub local_file: Option<PathBuf>,
    #[serde(default)]
    pub status: DownloadStatus,
}

impl ArtifactDownload {
    /// The local file this record contributes, if any.
    ///
    /// Failed records only contribute when `include_failed` is set and a
    /// local file was still recorded.
    pub fn usable_file(&self, include_failed: bool) -> Option<&Path> {
        if self.status == DownloadStatus::Failed && !include_failed {
            return None;
        }
        self.local_file.as_deref()
    }
}
