//! Test Data Builders
//!
//! Builder for claims with realistic defaults. Tests set only the fields they
//! care about; `partial` leaves everything else absent.

use chrono::{Days, Utc};
use domain_claims::{Claim, ClaimTimestamp, Field};
use fake::faker::address::en::CityName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use uuid::Uuid;

/// Generates a claim number that will not collide with other tests
pub fn unique_claim_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("CLM-{}", id[..10].to_uppercase())
}

/// Builder for constructing test claims
#[derive(Debug, Clone, Default)]
pub struct TestClaimBuilder {
    claim: Claim,
}

impl TestClaimBuilder {
    /// Creates a builder with a unique claim number and fake claimant details
    pub fn new() -> Self {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let reported = Utc::now();

        Self {
            claim: Claim {
                claim_number: Field::Present(unique_claim_number()),
                claim_status: Field::Present("Open".to_string()),
                created_timestamp: Field::Present(ClaimTimestamp::from(reported)),
                report_date: Field::Present(reported.date_naive()),
                policy_number: Field::Present(format!("PA-{}", &unique_claim_number()[4..10])),
                claimant_first_name: Field::Present(first),
                claimant_last_name: Field::Present(last),
                claimant_phone: Field::Present(PhoneNumber().fake()),
                claimant_email: Field::Present(SafeEmail().fake()),
                loss_date: Field::Present(reported.date_naive() - Days::new(2)),
                loss_location: Field::Present(CityName().fake()),
                loss_type: Field::Present("Collision".to_string()),
                ..Default::default()
            },
        }
    }

    /// Starts from a claim with no fields set
    pub fn partial() -> Self {
        Self::default()
    }

    /// Sets the claim number
    pub fn with_claim_number(mut self, number: impl Into<String>) -> Self {
        self.claim.claim_number = Field::Present(number.into());
        self
    }

    /// Sets vehicle details
    pub fn with_vehicle(mut self, year: i32, make: impl Into<String>, model: impl Into<String>) -> Self {
        self.claim.vehicle_year = Field::Present(year);
        self.claim.vehicle_make = Field::Present(make.into());
        self.claim.vehicle_model = Field::Present(model.into());
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        self.claim
    }
}
