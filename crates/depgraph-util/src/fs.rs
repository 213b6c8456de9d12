use std::path::Path;

use crate::errors::DepgraphError;

/// Document format of a report or config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.json` files are JSON, everything else is treated as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Read a UTF-8 document, mapping failures to [`DepgraphError::Report`].
pub fn read_document(path: &Path) -> Result<String, DepgraphError> {
    tracing::debug!("reading {}", path.display());
    std::fs::read_to_string(path).map_err(|e| DepgraphError::Report {
        message: format!("Failed to read {}: {e}", path.display()),
    })
}

/// Read a document if it exists. Returns `Ok(None)` for a missing file.
pub fn read_optional_document(path: &Path) -> Result<Option<String>, DepgraphError> {
    if path.is_file() {
        read_document(path).map(Some)
    } else {
        Ok(None)
    }
}
