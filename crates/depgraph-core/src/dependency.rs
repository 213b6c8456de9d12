use std::fmt;

use serde::{Deserialize, Serialize};

use crate::module::ModuleKey;
use crate::DEFAULT_CONFIGURATION;

/// A first-level dependency the user explicitly asked to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredDependency {
    #[serde(default)]
    pub group: Option<String>,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Configuration on the dependency the request targets.
    #[serde(default = "default_configuration")]
    pub configuration: String,
}

fn default_configuration() -> String {
    DEFAULT_CONFIGURATION.to_string()
}

impl DeclaredDependency {
    pub fn new(group: &str, name: &str, version: &str, configuration: &str) -> Self {
        Self {
            group: Some(group.to_string()),
            name: name.to_string(),
            version: Some(version.to_string()),
            configuration: configuration.to_string(),
        }
    }

    /// The reduced identity this request resolves to. Missing group or
    /// version become empty strings.
    pub fn key(&self) -> ModuleKey {
        ModuleKey {
            group: self.group.clone().unwrap_or_default(),
            name: self.name.clone(),
            revision: self.version.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for DeclaredDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key(), self.configuration)
    }
}
