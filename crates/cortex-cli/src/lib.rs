//! # cortex-cli: Analyzer Configuration Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: check a candidate configuration against a definition
//! - `inspect`: print a definition's identity and configuration items
//! - `id`: derive an analyzer id from name and version
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `cortex-schema`; no validation logic here.
//! - Handlers return an exit code: 0 success, 1 rejected input,
//!   2 operational error (reported by `main`).

pub mod identity;
pub mod inspect;
pub mod validate;

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

/// Read a candidate configuration object from a JSON or YAML file.
///
/// `.yaml`/`.yml` files are parsed as YAML, anything else as JSON. The
/// document must be a mapping.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, if the document is not a
/// mapping, or if a YAML value has no JSON representation (`.inf`, `.nan`).
pub fn load_candidate(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read configuration {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value: Value = match ext {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML in {}", path.display()))?;
            yaml_to_json_value(&yaml, "")
                .with_context(|| format!("unsupported value in {}", path.display()))?
        }
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
    };

    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "configuration {} must be an object, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// `at` is the key path of `yaml` within the document, used in errors.
/// Non-finite floats are rejected rather than collapsed to `null`, which
/// validation would read as an omitted field.
fn yaml_to_json_value(yaml: &serde_yaml::Value, at: &str) -> Result<Value> {
    let value = match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                match n.as_f64().and_then(serde_json::Number::from_f64) {
                    Some(f) => Value::Number(f),
                    None => bail!("'{}' holds {n}, which is not a finite number", display_path(at)),
                }
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(
            seq.iter()
                .enumerate()
                .map(|(i, v)| yaml_to_json_value(v, &format!("{at}[{i}]")))
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported YAML map key at '{}': {other:?}", display_path(at)),
                };
                let child = if at.is_empty() {
                    key.clone()
                } else {
                    format!("{at}.{key}")
                };
                json_map.insert(key, yaml_to_json_value(v, &child)?);
            }
            Value::Object(json_map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value, at)?,
    };
    Ok(value)
}

fn display_path(at: &str) -> &str {
    if at.is_empty() {
        "(root)"
    } else {
        at
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
