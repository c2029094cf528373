//! # Analyzer Identity
//!
//! An analyzer is identified by its name and version folded into a single
//! key. Every `.` in the folded string becomes `_`, so `"Tool"` at version
//! `"1.0"` is stored as `Tool_1_0`. Stored records and lookups depend on
//! this exact transformation; do not change it.

use serde::{Deserialize, Serialize};

/// Derive the stable identifier of an analyzer from its name and version.
///
/// Total and deterministic: every input pair yields an id.
pub fn compute_id(name: &str, version: &str) -> String {
    format!("{name}_{version}").replace('.', "_")
}

/// Identifier of an analyzer definition, derived from name and version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyzerId(String);

impl AnalyzerId {
    /// Compute the identifier for `name` at `version`.
    pub fn compute(name: &str, version: &str) -> Self {
        Self(compute_id(name, version))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AnalyzerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The derived id never contains a period.
        #[test]
        fn compute_id_has_no_periods(name in "[a-zA-Z0-9._-]{0,20}", version in "[0-9.]{0,10}") {
            prop_assert!(!compute_id(&name, &version).contains('.'));
        }

        /// Only periods change: the id has the length of `name_version`.
        #[test]
        fn compute_id_preserves_length(name in "[a-zA-Z0-9._]{0,20}", version in "[0-9.]{0,10}") {
            let id = compute_id(&name, &version);
            prop_assert_eq!(id.len(), name.len() + version.len() + 1);
        }

        /// Names and versions without periods are joined verbatim.
        #[test]
        fn compute_id_plain_join(name in "[a-zA-Z0-9_]{1,20}", version in "[0-9]{1,5}") {
            prop_assert_eq!(compute_id(&name, &version), format!("{name}_{version}"));
        }
    }
}
