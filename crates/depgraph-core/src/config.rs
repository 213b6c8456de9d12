use std::path::{Path, PathBuf};

use depgraph_util::errors::{DepgraphError, DepgraphResult};
use depgraph_util::fs::{read_document, read_optional_document};
use serde::{Deserialize, Serialize};

use crate::dependency::DeclaredDependency;
use crate::DEFAULT_CONFIGURATION;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "depgraph.toml";

/// User configuration loaded from `depgraph.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,

    /// First-level requests surfaced in the conversion result.
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
}

/// Conversion settings from `[convert]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_configuration")]
    pub configuration: String,
    #[serde(default, rename = "include-failed")]
    pub include_failed: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            configuration: default_configuration(),
            include_failed: false,
        }
    }
}

fn default_configuration() -> String {
    DEFAULT_CONFIGURATION.to_string()
}

impl Config {
    /// Load configuration from `path`, or `./depgraph.toml` when `path` is `None`.
    ///
    /// A missing file yields defaults. An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> DepgraphResult<Self> {
        let (path, content) = match path {
            Some(p) => (p.to_path_buf(), Some(read_document(p)?)),
            None => {
                let p = PathBuf::from(CONFIG_FILE_NAME);
                let content = read_optional_document(&p)?;
                (p, content)
            }
        };
        match content {
            Some(content) => Self::parse_toml(&content).map_err(|e| {
                DepgraphError::Report {
                    message: format!("Failed to parse {}: {e}", path.display()),
                }
                .into()
            }),
            None => Ok(Self::default()),
        }
    }

    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
