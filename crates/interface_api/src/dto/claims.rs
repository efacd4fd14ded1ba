//! Claims DTOs
//!
//! The claim record travels over HTTP unchanged: the request body of a create
//! is a partial `Claim`, and rows come back as `Claim`s.

use serde::{Deserialize, Serialize};

pub use domain_claims::Claim;

/// Body of `POST /claims`
pub type CreateClaimRequest = Claim;

/// A claim row as returned by list and create
pub type ClaimResponse = Claim;

/// Confirmation body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Confirmation for a successful delete
    pub fn claim_deleted(claim_number: &str) -> Self {
        Self {
            message: format!("Claim {} deleted successfully.", claim_number),
        }
    }
}
