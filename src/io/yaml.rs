//! YAML (de)serialisation between `Value` and text, and a stable textual
//! serialisation of a materialised document in the same textual language
//! as the input, with stable key ordering.

use crate::error::{CompileError, Result};
use crate::value::Value;
use std::path::Path;

pub fn parse(path: &Path, content: &str) -> Result<Value> {
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| CompileError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parsed.into())
}

/// Serialise a `Value` back to YAML text. `IndexMap` preserves insertion
/// order, so the output's key order matches the merged document's.
pub fn to_string(value: &Value) -> String {
    let yaml: serde_yaml::Value = value.into();
    serde_yaml::to_string(&yaml).unwrap_or_default()
}
