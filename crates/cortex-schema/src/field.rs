//! # Configuration Fields
//!
//! The typed configuration items an analyzer declares, and the ordered
//! [`Schema`] they form.
//!
//! Field definitions travel inside analyzer definition documents in the
//! platform's wire form:
//!
//! ```json
//! { "name": "key", "description": "API key", "type": "string",
//!   "multi": false, "required": true, "defaultValue": "..." }
//! ```
//!
//! In memory the two booleans are held as a set of [`FieldOption`]s.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cortex_core::CortexError;

/// Value type accepted by a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// JSON strings only.
    String,
    /// JSON numbers only, integer or floating point.
    Number,
    /// JSON booleans only.
    Boolean,
}

impl FieldType {
    /// Returns the serialized name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Whether `value` is a scalar of exactly this type.
    ///
    /// No coercion: `"1"` is not a number, `1` is not a string, and an
    /// array is never accepted.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = CortexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            other => Err(CortexError::SchemaValidation(format!(
                "unknown field type: {other:?}"
            ))),
        }
    }
}

/// Option flag carried by a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOption {
    /// The value is a sequence of elements of the field type.
    Multi,
    /// The field must be supplied, directly or through its default.
    Required,
}

/// One named, typed configuration item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldDefinitionWire", into = "FieldDefinitionWire")]
pub struct FieldDefinition {
    /// Key of the field in a configuration object.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Type every value (or every element, for multi fields) must have.
    pub field_type: FieldType,
    /// Option flags.
    pub options: BTreeSet<FieldOption>,
    /// Value used when the candidate omits the field.
    pub default_value: Option<Value>,
}

impl FieldDefinition {
    /// A single-valued, optional field with no default.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            field_type,
            options: BTreeSet::new(),
            default_value: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an option flag.
    pub fn with_option(mut self, option: FieldOption) -> Self {
        self.options.insert(option);
        self
    }

    /// Mark the field multi-valued.
    pub fn multi(self) -> Self {
        self.with_option(FieldOption::Multi)
    }

    /// Mark the field required.
    pub fn required(self) -> Self {
        self.with_option(FieldOption::Required)
    }

    /// Set the default value.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn is_required(&self) -> bool {
        self.options.contains(&FieldOption::Required)
    }

    pub fn is_multi(&self) -> bool {
        self.options.contains(&FieldOption::Multi)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDefinitionWire {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    multi: bool,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
}

impl From<FieldDefinitionWire> for FieldDefinition {
    fn from(wire: FieldDefinitionWire) -> Self {
        let mut options = BTreeSet::new();
        if wire.multi {
            options.insert(FieldOption::Multi);
        }
        if wire.required {
            options.insert(FieldOption::Required);
        }
        Self {
            name: wire.name,
            description: wire.description,
            field_type: wire.field_type,
            options,
            default_value: wire.default_value,
        }
    }
}

impl From<FieldDefinition> for FieldDefinitionWire {
    fn from(def: FieldDefinition) -> Self {
        Self {
            multi: def.is_multi(),
            required: def.is_required(),
            name: def.name,
            description: def.description,
            field_type: def.field_type,
            default_value: def.default_value,
        }
    }
}

/// Ordered sequence of field definitions.
///
/// Field names are expected to be unique. Validation does not enforce it;
/// callers that build schemas from untrusted documents should call
/// [`Schema::check_unique_names`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDefinition>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Returns the field definitions in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name. With duplicate names the first wins.
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Reject schemas that declare the same field name twice.
    ///
    /// # Errors
    ///
    /// Returns `CortexError::SchemaValidation` naming the first duplicate.
    pub fn check_unique_names(&self) -> Result<(), CortexError> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(CortexError::SchemaValidation(format!(
                    "duplicate configuration item: {:?}",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<FieldDefinition> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
