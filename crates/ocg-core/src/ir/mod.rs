//! Read-only intermediate representation handed over by the OpenAPI parser.

pub mod document;
pub mod operations;

pub use document::{IrComponents, IrDocument};
pub use operations::*;

use crate::error::LoadError;

/// Load an IR document from YAML.
pub fn from_yaml(input: &str) -> Result<IrDocument, LoadError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Load an IR document from JSON.
pub fn from_json(input: &str) -> Result<IrDocument, LoadError> {
    Ok(serde_json::from_str(input)?)
}
