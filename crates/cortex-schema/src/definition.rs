//! # Analyzer Definitions
//!
//! The registration document of an analyzer: identity, metadata, the data
//! types it accepts, and its configuration items. Definitions are read from
//! a single JSON or YAML file named by the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use cortex_core::{AnalyzerId, CortexError};

use crate::field::{FieldDefinition, Schema};
use crate::validate::{validate_schema, ValidationOutcome};

/// Error loading an analyzer definition.
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// The definition file could not be read or parsed.
    #[error("definition load error for '{path}': {reason}")]
    Load {
        /// Path to the definition file.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// The document text could not be parsed.
    #[error("definition parse error: {0}")]
    Parse(String),

    /// The document parsed but declares an unusable schema.
    #[error("definition schema error: {0}")]
    Schema(#[from] CortexError),
}

/// Registration document of an analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerDefinition {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub license: String,
    /// Observable data types the analyzer accepts (e.g. `ip`, `domain`).
    #[serde(default)]
    pub data_type_list: Vec<String>,
    /// Name of the shared configuration block this analyzer draws from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_config: Option<String>,
    #[serde(default)]
    pub configuration_items: Vec<FieldDefinition>,
}

impl AnalyzerDefinition {
    /// Parse a definition from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::Parse` on malformed JSON and
    /// `DefinitionError::Schema` if two configuration items share a name.
    pub fn from_json_str(content: &str) -> Result<Self, DefinitionError> {
        let def: Self = serde_json::from_str(content)
            .map_err(|e| DefinitionError::Parse(format!("invalid JSON: {e}")))?;
        def.schema().check_unique_names()?;
        Ok(def)
    }

    /// Parse a definition from YAML text.
    ///
    /// # Errors
    ///
    /// As [`AnalyzerDefinition::from_json_str`], for YAML input.
    pub fn from_yaml_str(content: &str) -> Result<Self, DefinitionError> {
        let def: Self = serde_yaml::from_str(content)
            .map_err(|e| DefinitionError::Parse(format!("invalid YAML: {e}")))?;
        def.schema().check_unique_names()?;
        Ok(def)
    }

    /// Load a definition from a file.
    ///
    /// `.yaml` and `.yml` files are read as YAML; anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::Load` if the file cannot be read or parsed,
    /// and `DefinitionError::Schema` if its configuration items collide.
    pub fn from_file(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionError::Load {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parsed = match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        };

        let def = parsed.map_err(|e| match e {
            DefinitionError::Parse(reason) => DefinitionError::Load {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        tracing::info!(
            analyzer = %def.id(),
            items = def.configuration_items.len(),
            "loaded analyzer definition"
        );
        Ok(def)
    }

    /// Stable identifier derived from name and version.
    pub fn id(&self) -> AnalyzerId {
        AnalyzerId::compute(&self.name, &self.version)
    }

    /// The configuration items as a schema.
    pub fn schema(&self) -> Schema {
        Schema::new(self.configuration_items.clone())
    }

    /// Whether the analyzer accepts observables of `data_type`.
    pub fn can_process(&self, data_type: &str) -> bool {
        self.data_type_list.iter().any(|t| t == data_type)
    }

    /// Validate a candidate configuration against this definition.
    pub fn validate_configuration(&self, candidate: &Map<String, Value>) -> ValidationOutcome {
        let schema = self.schema();
        validate_schema(&schema, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use serde_json::json;

    const SHODAN: &str = r#"{
        "name": "Shodan_Host",
        "version": "1.0",
        "author": "Cortex Team",
        "license": "AGPL-V3",
        "dataTypeList": ["ip"],
        "baseConfig": "Shodan",
        "configurationItems": [
            {"name": "key", "description": "API key", "type": "string", "required": true},
            {"name": "history", "type": "boolean", "defaultValue": false}
        ]
    }"#;

    #[test]
    fn test_from_json_str() {
        let def = AnalyzerDefinition::from_json_str(SHODAN).unwrap();
        assert_eq!(def.id().as_str(), "Shodan_Host_1_0");
        assert_eq!(def.base_config.as_deref(), Some("Shodan"));
        assert!(def.description.is_empty());
        let schema = def.schema();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields()[1].field_type, FieldType::Boolean);
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
name: DNS.Lookup
version: "2.1"
dataTypeList: [domain, fqdn]
configurationItems:
  - name: resolvers
    type: string
    multi: true
"#;
        let def = AnalyzerDefinition::from_yaml_str(yaml).unwrap();
        assert_eq!(def.id().as_str(), "DNS_Lookup_2_1");
        assert!(def.schema().fields()[0].is_multi());
    }

    #[test]
    fn test_can_process() {
        let def = AnalyzerDefinition::from_json_str(SHODAN).unwrap();
        assert!(def.can_process("ip"));
        assert!(!def.can_process("domain"));
    }

    #[test]
    fn test_duplicate_items_rejected() {
        let json = r#"{
            "name": "X", "version": "1",
            "configurationItems": [
                {"name": "key", "type": "string"},
                {"name": "key", "type": "number"}
            ]
        }"#;
        let err = AnalyzerDefinition::from_json_str(json).unwrap_err();
        assert!(matches!(err, DefinitionError::Schema(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = AnalyzerDefinition::from_json_str("{\"name\": ").unwrap_err();
        assert!(matches!(err, DefinitionError::Parse(_)));
    }

    #[test]
    fn test_missing_version_rejected() {
        let err = AnalyzerDefinition::from_json_str(r#"{"name": "X"}"#).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = AnalyzerDefinition::from_file(Path::new("/nonexistent/analyzer.json"))
            .unwrap_err();
        assert!(matches!(err, DefinitionError::Load { .. }));
    }

    #[test]
    fn test_validate_configuration() {
        let def = AnalyzerDefinition::from_json_str(SHODAN).unwrap();
        let config = def
            .validate_configuration(json!({"key": "abc"}).as_object().unwrap())
            .unwrap();
        assert_eq!(Value::Object(config), json!({"key": "abc", "history": false}));

        let errors = def.validate_configuration(&Map::new()).unwrap_err();
        assert_eq!(errors.errors()[0].field(), "key");
    }
}
