//! # Configured Analyzers
//!
//! An [`AnalyzerRecord`] is an analyzer definition enabled with a concrete
//! configuration. The configuration is stored as a JSON string, the way the
//! platform persists it, and is only ever produced by validating a
//! candidate against the definition's schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use cortex_core::{AnalyzerId, RateUnit};

use crate::definition::AnalyzerDefinition;
use crate::validate::{ValidationErrors, ValidationOutcome};

/// Error assembling or reading an analyzer record.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The candidate configuration was rejected.
    #[error("configuration rejected:\n{0}")]
    Invalid(ValidationErrors),

    /// The stored configuration is not a JSON object.
    #[error("stored configuration is malformed: {0}")]
    Configuration(#[from] serde_json::Error),

    /// Rate limit fields are inconsistent.
    #[error("invalid rate limit: {0}")]
    Rate(String),
}

/// A configured analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerRecord {
    /// Definition this record configures.
    pub analyzer_definition_id: AnalyzerId,
    /// Display name chosen when the analyzer was enabled.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data_type_list: Vec<String>,
    /// Normalized configuration, serialized as a JSON object.
    pub configuration: String,
    /// Maximum number of jobs per `rate_unit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_unit: Option<RateUnit>,
    /// Minutes a job report may be reused for an identical request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_cache: Option<u32>,
}

impl AnalyzerRecord {
    /// Enable `definition` under `name` with the given candidate configuration.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Invalid` carrying every validation error if the
    /// candidate does not satisfy the definition's schema.
    pub fn configure(
        definition: &AnalyzerDefinition,
        name: impl Into<String>,
        candidate: &Map<String, Value>,
    ) -> Result<Self, RecordError> {
        let name = name.into();
        let config = definition.validate_configuration(candidate).map_err(|errors| {
            tracing::warn!(
                analyzer = %definition.id(),
                name = %name,
                errors = errors.len(),
                "rejected analyzer configuration"
            );
            RecordError::Invalid(errors)
        })?;

        Ok(Self {
            analyzer_definition_id: definition.id(),
            name,
            description: definition.description.clone(),
            data_type_list: definition.data_type_list.clone(),
            configuration: serde_json::to_string(&config)?,
            rate: None,
            rate_unit: None,
            job_cache: None,
        })
    }

    /// Limit the analyzer to `rate` jobs per `unit`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Rate` for a zero rate.
    pub fn with_rate(mut self, rate: u32, unit: RateUnit) -> Result<Self, RecordError> {
        if rate == 0 {
            return Err(RecordError::Rate("rate must be positive".into()));
        }
        self.rate = Some(rate);
        self.rate_unit = Some(unit);
        Ok(self)
    }

    /// Reuse reports of identical jobs for `minutes`.
    pub fn with_job_cache(mut self, minutes: u32) -> Self {
        self.job_cache = Some(minutes);
        self
    }

    /// Check the rate limit fields of a record read back from storage.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Rate` if exactly one of `rate` and `rate_unit`
    /// is set, or if the rate is zero.
    pub fn check_rate(&self) -> Result<(), RecordError> {
        match (self.rate, self.rate_unit) {
            (None, None) => Ok(()),
            (Some(0), _) => Err(RecordError::Rate("rate must be positive".into())),
            (Some(_), Some(_)) => Ok(()),
            (Some(_), None) => Err(RecordError::Rate("rate set without a unit".into())),
            (None, Some(unit)) => Err(RecordError::Rate(format!(
                "rate unit {unit} set without a rate"
            ))),
        }
    }

    /// Parse the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Configuration` if the stored string is not a
    /// JSON object.
    pub fn configuration_object(&self) -> Result<Map<String, Value>, RecordError> {
        Ok(serde_json::from_str(&self.configuration)?)
    }

    /// Re-validate the stored configuration, e.g. after the definition
    /// gained new items.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Configuration` if the stored string cannot be
    /// parsed. Validation failures are reported in the returned outcome.
    pub fn revalidate(
        &self,
        definition: &AnalyzerDefinition,
    ) -> Result<ValidationOutcome, RecordError> {
        let stored = self.configuration_object()?;
        Ok(definition.validate_configuration(&stored))
    }
}
