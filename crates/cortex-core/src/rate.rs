//! # Rate-Limit Units
//!
//! A configured analyzer may be limited to a number of jobs per period.
//! `RateUnit` names that period.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CortexError;

/// Period over which an analyzer's rate limit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateUnit {
    /// Limit resets every day.
    Day,
    /// Limit resets every month.
    Month,
}

impl RateUnit {
    /// Returns both units in declaration order.
    pub fn all_units() -> &'static [RateUnit] {
        &[Self::Day, Self::Month]
    }

    /// Returns the serialized name of this unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Month => "Month",
        }
    }
}

impl std::fmt::Display for RateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateUnit {
    type Err = CortexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Day" => Ok(Self::Day),
            "Month" => Ok(Self::Month),
            other => Err(CortexError::SchemaValidation(format!(
                "unknown rate unit: {other:?}"
            ))),
        }
    }
}
