//! # cortex-schema: Analyzer Configuration Schemas
//!
//! An analyzer declares an ordered list of typed configuration items. This
//! crate validates candidate configurations against that list and carries
//! the documents the declaration travels in.
//!
//! ## Field Model (`field`)
//!
//! [`FieldType`], [`FieldOption`], [`FieldDefinition`] and the ordered
//! [`Schema`] of definitions.
//!
//! ## Validation (`validate`)
//!
//! [`ConfigSchemaValidator`] checks a candidate JSON object field by field.
//! Errors from independent fields, and from independent elements of a
//! multi-valued field, accumulate: one call reports every problem in the
//! candidate.
//!
//! ## Documents (`definition`, `record`)
//!
//! [`AnalyzerDefinition`] is the registration document of an analyzer,
//! loaded from a single JSON or YAML file. [`AnalyzerRecord`] is a
//! configured instance whose configuration has passed validation.
//!
//! ## Crate Policy
//!
//! - Depends only on `cortex-core` internally.
//! - Validation is pure: no I/O, no shared state, safe to call from any
//!   number of threads.
//! - Validation never panics on candidate input; rejections are values.

pub mod definition;
pub mod field;
pub mod record;
pub mod validate;

pub use definition::{AnalyzerDefinition, DefinitionError};
pub use field::{FieldDefinition, FieldOption, FieldType, Schema};
pub use record::{AnalyzerRecord, RecordError};
pub use validate::{
    accumulate, validate_field, validate_schema, ConfigSchemaValidator, ValidationError,
    ValidationErrors, ValidationOutcome,
};
