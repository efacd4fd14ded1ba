//! Claims Domain Ports
//!
//! The `ClaimsPort` trait is everything the façade needs from the table that
//! holds claims. Each method is a single remote operation and returns the
//! rows the store reports back, so callers can tell "nothing happened" apart
//! from a failure.
//!
//! Implementations:
//!
//! - **REST adapter** (`infra_store`): the hosted table's REST API
//! - **In-memory store** (`test_utils`): for tests without a network

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::claim::Claim;

/// Port for the claims table
#[async_trait]
pub trait ClaimsPort: DomainPort + HealthCheckable {
    /// Returns every row in the table, in whatever order the store scans them
    async fn list_claims(&self) -> Result<Vec<Claim>, PortError>;

    /// Inserts one row built from the supplied fields
    ///
    /// # Returns
    ///
    /// The rows the store echoed back; empty when nothing was inserted
    async fn insert_claim(&self, claim: &Claim) -> Result<Vec<Claim>, PortError>;

    /// Deletes every row whose `claim_number` equals the given value
    ///
    /// # Returns
    ///
    /// The deleted rows; empty when no row matched
    async fn delete_claims(&self, claim_number: &str) -> Result<Vec<Claim>, PortError>;
}
