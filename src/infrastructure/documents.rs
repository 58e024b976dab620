//! Reading configuration documents and `KEY=VALUE` assignments.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::domain::models::Configuration;

/// Read a YAML or JSON document whose top level is a mapping
pub fn read_document(path: &Path) -> Result<Configuration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_document(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse a YAML or JSON document whose top level is a mapping.
///
/// An empty document is an empty configuration.
pub fn parse_document(content: &str) -> Result<Configuration> {
    if content.trim().is_empty() {
        return Ok(Configuration::new());
    }

    let value: Value = serde_yaml::from_str(content).context("Invalid YAML/JSON")?;
    match Configuration::try_from(value) {
        Ok(config) => Ok(config),
        Err(other) => bail!("Top level must be a mapping, found {}", kind_of(&other)),
    }
}

/// Parse `KEY=VALUE`. The value is read as a YAML scalar, so `3` is a
/// number, `true` a boolean and anything unparseable a plain string.
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Expected KEY=VALUE, got '{raw}'");
    };

    let key = key.trim();
    if key.is_empty() {
        bail!("Empty key in assignment '{raw}'");
    }

    let value = if value.is_empty() {
        Value::String(String::new())
    } else {
        serde_yaml::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
    };

    Ok((key.to_string(), value))
}

/// Component name for a layer file: its stem, or the full path if it has none
pub fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
