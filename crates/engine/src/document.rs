//! Loading node documents and data contexts from YAML or JSON files.

use std::{fs, path::Path};

use calltag_types::{Element, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' is not a valid document: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Parses a node document. JSON is accepted since it is valid YAML.
pub fn parse_node_str(content: &str) -> Result<Element, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Loads a node document from disk.
pub fn parse_node_file(file_path: impl AsRef<Path>) -> Result<Element, DocumentError> {
    let file_path = file_path.as_ref();
    let content = read(file_path)?;
    parse_node_str(&content).map_err(|source| DocumentError::Format {
        path: file_path.display().to_string(),
        source,
    })
}

/// Loads a data context from disk. An empty file yields a null context.
pub fn load_data_context(file_path: impl AsRef<Path>) -> Result<Value, DocumentError> {
    let file_path = file_path.as_ref();
    let content = read(file_path)?;
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&content).map_err(|source| DocumentError::Format {
        path: file_path.display().to_string(),
        source,
    })
}

fn read(file_path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(file_path).map_err(|source| DocumentError::Io {
        path: file_path.display().to_string(),
        source,
    })
}
