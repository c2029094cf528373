//! # cortex-core: Foundational Types for Analyzer Configuration
//!
//! Leaf crate of the workspace. It defines the primitives every other
//! crate shares: the top-level error type, the analyzer identity newtype,
//! and the rate-limit unit attached to configured analyzers.
//!
//! ## Key Design Principles
//!
//! 1. **One identity derivation.** `compute_id()` is the only way
//!    to turn a name and version into an analyzer id. Downstream lookups
//!    key on the exact string it produces.
//!
//! 2. **Closed enumerations.** `RateUnit` is a plain enum with serde derives
//!    and an exhaustive `FromStr`; adding a unit forces every consumer to
//!    handle it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cortex-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod rate;

pub use error::CortexError;
pub use identity::{compute_id, AnalyzerId};
pub use rate::RateUnit;
