//! # Error Types
//!
//! Top-level error type shared by the workspace. Crate-specific failures
//! (definition loading, record assembly) live next to the code that raises
//! them and wrap `CortexError` where a schema problem is the cause.

use thiserror::Error;

/// Top-level error type for analyzer configuration handling.
#[derive(Error, Debug)]
pub enum CortexError {
    /// A schema or enumeration value was malformed.
    #[error("schema validation error: {0}")]
    SchemaValidation(String),
}
