//! Claims table adapter
//!
//! Implements `ClaimsPort` over the hosted table's REST API. Every port call
//! is exactly one HTTP request; there is no retry or caching here.

use std::time::Instant;

use async_trait::async_trait;
use tracing::warn;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimsPort};

use crate::client::TableClient;
use crate::config::StoreConfig;
use crate::error::StoreError;

/// Column used as the delete key
const CLAIM_NUMBER_COLUMN: &str = "claim_number";

/// `ClaimsPort` backed by the hosted claims table
///
/// # Example
///
/// ```rust,ignore
/// let adapter = RestClaimsAdapter::new(&StoreConfig::from_env()?)?;
/// let service = ClaimsService::new(Arc::new(adapter));
/// ```
#[derive(Debug, Clone)]
pub struct RestClaimsAdapter {
    client: TableClient,
}

impl RestClaimsAdapter {
    /// Creates an adapter for the configured table
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            client: TableClient::new(config)?,
        })
    }
}

impl DomainPort for RestClaimsAdapter {}

#[async_trait]
impl ClaimsPort for RestClaimsAdapter {
    async fn list_claims(&self) -> Result<Vec<Claim>, PortError> {
        Ok(self.client.select_all().await?)
    }

    async fn insert_claim(&self, claim: &Claim) -> Result<Vec<Claim>, PortError> {
        Ok(self.client.insert(claim).await?)
    }

    async fn delete_claims(&self, claim_number: &str) -> Result<Vec<Claim>, PortError> {
        Ok(self.client.delete_eq(CLAIM_NUMBER_COLUMN, claim_number).await?)
    }
}

#[async_trait]
impl HealthCheckable for RestClaimsAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let adapter_id = format!("table:{}", self.client.table_name());
        let started = Instant::now();

        let outcome = self.client.ping(CLAIM_NUMBER_COLUMN).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => HealthCheckResult::healthy(adapter_id, latency_ms),
            Err(e) => {
                warn!(error = %e, latency_ms, "Claims table health check failed");
                HealthCheckResult::unhealthy(adapter_id, latency_ms, e.to_string())
            }
        }
    }
}
