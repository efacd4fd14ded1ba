//! In-Memory Claims Store
//!
//! A `ClaimsPort` that keeps rows in a vector. It behaves like a hosted table
//! with a unique constraint on `claim_number`, and can be switched into an
//! outage mode to exercise fault paths without a network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimsPort};

const ADAPTER_ID: &str = "in-memory";

/// In-memory claims table
#[derive(Debug)]
pub struct InMemoryClaimsStore {
    rows: Mutex<Vec<Claim>>,
    allow_duplicates: bool,
    echo_inserts: AtomicBool,
    unavailable: AtomicBool,
}

impl InMemoryClaimsStore {
    /// Creates an empty store with a unique constraint on `claim_number`
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            allow_duplicates: false,
            echo_inserts: AtomicBool::new(true),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Creates an empty store without the unique constraint
    pub fn without_unique_claim_number() -> Self {
        Self {
            allow_duplicates: true,
            ..Self::new()
        }
    }

    /// Creates a store pre-loaded with rows
    pub fn with_rows(rows: impl IntoIterator<Item = Claim>) -> Self {
        let store = Self::new();
        store.rows.lock().unwrap().extend(rows);
        store
    }

    /// Makes every subsequent call fail with a connection error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes inserts succeed without echoing the row back
    pub fn set_echo_inserts(&self, echo: bool) {
        self.echo_inserts.store(echo, Ordering::SeqCst);
    }

    /// Snapshot of the stored rows
    pub fn rows(&self) -> Vec<Claim> {
        self.rows.lock().unwrap().clone()
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Returns true if the table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(PortError::connection("in-memory store is unavailable"))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryClaimsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainPort for InMemoryClaimsStore {}

#[async_trait]
impl HealthCheckable for InMemoryClaimsStore {
    async fn health_check(&self) -> HealthCheckResult {
        match self.check_available() {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, 0),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, 0, e.to_string()),
        }
    }
}

#[async_trait]
impl ClaimsPort for InMemoryClaimsStore {
    async fn list_claims(&self) -> Result<Vec<Claim>, PortError> {
        self.check_available()?;
        Ok(self.rows())
    }

    async fn insert_claim(&self, claim: &Claim) -> Result<Vec<Claim>, PortError> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();

        if let (false, Some(number)) = (self.allow_duplicates, claim.claim_number()) {
            if rows.iter().any(|r| r.claim_number() == Some(number)) {
                return Err(PortError::conflict(format!(
                    "duplicate key value violates unique constraint: claim_number={}",
                    number
                )));
            }
        }

        rows.push(claim.clone());

        if self.echo_inserts.load(Ordering::SeqCst) {
            Ok(vec![claim.clone()])
        } else {
            Ok(Vec::new())
        }
    }

    async fn delete_claims(&self, claim_number: &str) -> Result<Vec<Claim>, PortError> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();

        let (deleted, kept): (Vec<Claim>, Vec<Claim>) = rows
            .drain(..)
            .partition(|r| r.claim_number() == Some(claim_number));
        *rows = kept;

        Ok(deleted)
    }
}
