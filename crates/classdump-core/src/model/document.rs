//! Definition documents: a YAML serialization of the entity model.
//!
//! This is not the DSL. A front end (or a hand-written fixture) can emit a
//! document listing definitions, which loads straight into a
//! [`DefinitionCollection`].

use std::path::Path;

use serde::Deserialize;

use super::{CollectionError, Definition, DefinitionCollection};

/// Error while loading a definition document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read definitions file '{}': {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse definitions YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

#[derive(Debug, Deserialize)]
struct DefinitionDocument {
    #[serde(default)]
    definitions: Vec<Definition>,
}

/// Parse a definition document from a YAML string.
pub fn parse_document_str(yaml: &str) -> Result<DefinitionCollection, DocumentError> {
    let document: DefinitionDocument = serde_yaml::from_str(yaml)?;
    Ok(DefinitionCollection::from_definitions(document.definitions)?)
}

/// Read and parse a definition document file.
pub fn parse_document(path: &Path) -> Result<DefinitionCollection, DocumentError> {
    let yaml = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let collection = parse_document_str(&yaml)?;
    tracing::debug!(path = %path.display(), definitions = collection.len(), "Loaded definition document");
    Ok(collection)
}
