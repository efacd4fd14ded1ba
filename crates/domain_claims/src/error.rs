//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimsError {
    /// The store inserted no row
    #[error("Claim could not be created.")]
    NotCreated,

    /// No row matched the claim number
    #[error("Claim {claim_number} not found.")]
    NotFound { claim_number: String },

    /// The store call itself failed
    #[error(transparent)]
    Store(#[from] PortError),
}

impl ClaimsError {
    pub fn not_found(claim_number: impl Into<String>) -> Self {
        ClaimsError::NotFound {
            claim_number: claim_number.into(),
        }
    }
}

/// A timestamp in none of the accepted ISO 8601 forms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp '{0}', expected an ISO 8601 date and time")]
pub struct InvalidTimestamp(pub String);
