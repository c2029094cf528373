//! # Configuration Validation
//!
//! Validates a candidate configuration object against an analyzer's
//! [`Schema`], producing either the normalized configuration or every
//! error found in the candidate.
//!
//! ## Per-field rules
//!
//! 1. The value is the candidate's entry for the field name; failing that,
//!    the field's default. A JSON `null` entry counts as missing.
//! 2. Missing: multi fields become `[]`, required fields fail with
//!    [`ValidationError::MissingRequired`], other fields become `null`.
//! 3. Multi fields take an array; each element is type-checked and element
//!    errors are reported under `<name>[]`.
//! 4. Single fields take a scalar of exactly the declared type.
//!
//! ## Accumulation
//!
//! Nothing short-circuits. Every field is checked, and every element of a
//! multi field is checked, so a rejected candidate lists all of its
//! problems in schema order.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::field::{FieldDefinition, FieldType, Schema};

/// Suffix appended to a field name for errors raised by one element of a
/// multi-valued field.
const ELEMENT_SUFFIX: &str = "[]";

/// A single rejected field.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
    /// A value was present but had the wrong type or shape.
    #[error("invalid format for '{field}': expected {expected}, got {actual}")]
    InvalidFormat {
        /// Field name, with a `[]` suffix for element errors.
        field: String,
        /// Declared type of the field.
        expected: FieldType,
        /// The offending value.
        actual: Value,
    },

    /// A required field was absent and had no default.
    #[error("missing required field '{field}'")]
    MissingRequired {
        /// Field name.
        field: String,
    },
}

impl ValidationError {
    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidFormat { field, .. } | Self::MissingRequired { field } => field,
        }
    }
}

/// Ordered, non-empty collection of validation errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Result of validating a whole candidate: the normalized configuration,
/// keyed in schema order, or every error found.
pub type ValidationOutcome = Result<Map<String, Value>, ValidationErrors>;

/// Collect independent results: all successes in order, or the
/// concatenation of every failure in order.
pub fn accumulate<T, I>(results: I) -> Result<Vec<T>, ValidationErrors>
where
    I: IntoIterator<Item = Result<T, ValidationErrors>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(v) => values.push(v),
            Err(e) => errors.extend(e),
        }
    }
    if errors.is_empty() {
        Ok(values)
    } else {
        Err(ValidationErrors { errors })
    }
}

fn check_scalar(field: &str, expected: FieldType, value: &Value) -> Result<Value, ValidationErrors> {
    if expected.accepts(value) {
        Ok(value.clone())
    } else {
        Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            expected,
            actual: value.clone(),
        }
        .into())
    }
}

/// Validate one field of `candidate` against its definition.
///
/// On success returns the field name paired with the normalized value.
///
/// An explicit `null` in `candidate` is read as an omitted field, so it is
/// replaced by the field's default when one is declared.
pub fn validate_field(
    def: &FieldDefinition,
    candidate: &Map<String, Value>,
) -> Result<(String, Value), ValidationErrors> {
    let value = candidate
        .get(&def.name)
        .filter(|v| !v.is_null())
        .or_else(|| def.default_value.as_ref().filter(|v| !v.is_null()));

    let checked = match value {
        None if def.is_multi() => Value::Array(Vec::new()),
        None if def.is_required() => {
            return Err(ValidationError::MissingRequired {
                field: def.name.clone(),
            }
            .into())
        }
        None => Value::Null,
        Some(Value::Array(items)) if def.is_multi() => {
            let element = format!("{}{ELEMENT_SUFFIX}", def.name);
            let checked = accumulate(
                items
                    .iter()
                    .map(|item| check_scalar(&element, def.field_type, item)),
            )?;
            Value::Array(checked)
        }
        Some(other) if def.is_multi() => {
            return Err(ValidationError::InvalidFormat {
                field: def.name.clone(),
                expected: def.field_type,
                actual: other.clone(),
            }
            .into())
        }
        Some(scalar) => check_scalar(&def.name, def.field_type, scalar)?,
    };

    Ok((def.name.clone(), checked))
}

/// Validate every field of `schema` against `candidate`.
///
/// Keys of `candidate` that the schema does not declare are dropped from
/// the normalized output.
pub fn validate_schema(schema: &Schema, candidate: &Map<String, Value>) -> ValidationOutcome {
    let outcome = accumulate(schema.iter().map(|def| validate_field(def, candidate)))
        .map(|pairs| pairs.into_iter().collect::<Map<String, Value>>());

    match &outcome {
        Ok(config) => tracing::debug!(fields = config.len(), "configuration accepted"),
        Err(errors) => tracing::debug!(
            fields = schema.len(),
            errors = errors.len(),
            "configuration rejected"
        ),
    }

    outcome
}

/// Validator bound to one analyzer's schema.
///
/// Holds no state beyond the schema itself, so a single instance can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ConfigSchemaValidator {
    schema: Schema,
}

impl ConfigSchemaValidator {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a full candidate configuration.
    pub fn validate(&self, candidate: &Map<String, Value>) -> ValidationOutcome {
        validate_schema(&self.schema, candidate)
    }

    /// Validate a candidate that may not be a JSON object at all.
    ///
    /// Non-object candidates are validated as if empty, so the result lists
    /// every field that cannot be satisfied without input.
    pub fn validate_value(&self, candidate: &Value) -> ValidationOutcome {
        match candidate {
            Value::Object(map) => self.validate(map),
            _ => self.validate(&Map::new()),
        }
    }

    /// Validate a single named field. Returns `None` if the schema has no
    /// field by that name.
    pub fn validate_field(
        &self,
        name: &str,
        candidate: &Map<String, Value>,
    ) -> Option<Result<(String, Value), ValidationErrors>> {
        self.schema
            .get(name)
            .map(|def| validate_field(def, candidate))
    }
}

impl From<Schema> for ConfigSchemaValidator {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}
