//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims façade test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims for common scenarios
//! - `builders`: Builder for claims with realistic defaults
//! - `store`: In-memory `ClaimsPort` with unique-key and outage simulation
//! - `assertions`: Assertion helpers for claim rows
//! - `generators`: Property-based claim generators

pub mod fixtures;
pub mod builders;
pub mod store;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use store::*;
pub use assertions::*;
pub use generators::*;
