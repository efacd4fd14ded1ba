//! Claims service
//!
//! Forwards each operation to the claims port and interprets empty results.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::claim::Claim;
use crate::error::ClaimsError;
use crate::ports::ClaimsPort;

/// Application service for the claims table
///
/// Holds the one long-lived store handle. Cloning the service clones the
/// `Arc`, not the store.
#[derive(Clone)]
pub struct ClaimsService {
    port: Arc<dyn ClaimsPort>,
}

impl ClaimsService {
    /// Creates a service over the given port
    pub fn new(port: Arc<dyn ClaimsPort>) -> Self {
        Self { port }
    }

    /// Returns the underlying port
    pub fn port(&self) -> &Arc<dyn ClaimsPort> {
        &self.port
    }

    /// Lists every claim in store order
    ///
    /// An empty table yields an empty vector.
    pub async fn list(&self) -> Result<Vec<Claim>, ClaimsError> {
        let claims = self.port.list_claims().await?;
        debug!(count = claims.len(), "Listed claims");
        Ok(claims)
    }

    /// Creates a claim from the supplied fields
    ///
    /// # Returns
    ///
    /// The first row the store echoed back
    ///
    /// # Errors
    ///
    /// `ClaimsError::NotCreated` when the store inserted nothing or refused the
    /// payload. Other store failures pass through as `ClaimsError::Store`.
    pub async fn create(&self, claim: &Claim) -> Result<Claim, ClaimsError> {
        let fields = claim.supplied_fields();

        let rows = match self.port.insert_claim(claim).await {
            Ok(rows) => rows,
            Err(e) if e.is_rejection() => {
                warn!(error = %e, ?fields, "Store rejected claim insert");
                return Err(ClaimsError::NotCreated);
            }
            Err(e) => return Err(e.into()),
        };

        match rows.into_iter().next() {
            Some(created) => {
                info!(
                    claim_number = created.claim_number().unwrap_or_default(),
                    field_count = fields.len(),
                    "Claim created"
                );
                Ok(created)
            }
            None => {
                warn!(?fields, "Store returned no row for claim insert");
                Err(ClaimsError::NotCreated)
            }
        }
    }

    /// Deletes the claim with the given number
    ///
    /// # Returns
    ///
    /// The number of rows removed, at least one
    ///
    /// # Errors
    ///
    /// `ClaimsError::NotFound` when no row matched
    pub async fn delete(&self, claim_number: &str) -> Result<usize, ClaimsError> {
        let deleted = self.port.delete_claims(claim_number).await?;

        if deleted.is_empty() {
            info!(claim_number, "No claim matched delete");
            return Err(ClaimsError::not_found(claim_number));
        }

        info!(claim_number, rows = deleted.len(), "Claim deleted");
        Ok(deleted.len())
    }
}

impl std::fmt::Debug for ClaimsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimsService").finish_non_exhaustive()
    }
}
