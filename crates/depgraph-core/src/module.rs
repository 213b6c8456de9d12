//! Module identities.
//!
//! The resolution engine identifies a module by group, name and revision plus
//! any number of extra attributes (branch, custom qualifiers). depgraph only
//! cares about group, name and revision. The two notions are kept as separate
//! types with [`ModuleId::normalize`] as the only projection between them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The resolution engine's full module identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    pub group: String,
    pub name: String,
    pub revision: String,
    /// Extra identity attributes (e.g. `branch`). Part of equality.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ModuleId {
    pub fn new(group: &str, name: &str, revision: &str) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            revision: revision.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Project onto depgraph's equality: drop everything but group, name and revision.
    pub fn normalize(&self) -> ModuleKey {
        ModuleKey {
            group: self.group.clone(),
            name: self.name.clone(),
            revision: self.revision.clone(),
        }
    }

    /// `group:name:revision` coordinate string.
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group, self.name, self.revision)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.revision)?;
        for (k, v) in &self.extra {
            write!(f, ";{k}={v}")?;
        }
        Ok(())
    }
}

/// depgraph's reduced module identity: group, name and revision only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey {
    pub group: String,
    pub name: String,
    pub revision: String,
}

impl ModuleKey {
    pub fn new(group: &str, name: &str, revision: &str) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            revision: revision.to_string(),
        }
    }

    /// `group:name` identifier (without revision).
    pub fn short(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl From<&ModuleId> for ModuleKey {
    fn from(id: &ModuleId) -> Self {
        id.normalize()
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.revision)
    }
}
