//! Pre-built Test Fixtures
//!
//! Ready-to-use claims for common scenarios. Values are fixed so tests can
//! assert on them directly.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use domain_claims::{Claim, ClaimTimestamp, Field};

/// Fixture for claim records
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// The three-field claim used in the API examples
    pub fn minimal() -> Claim {
        Claim {
            claim_number: Field::Present("C-1001".to_string()),
            policy_number: Field::Present("P-55".to_string()),
            vehicle_year: Field::Present(2020),
            ..Default::default()
        }
    }

    /// A closed rear-end collision claim with every field populated
    pub fn closed_collision() -> Claim {
        Claim {
            claim_number: Field::Present("CLM-2024-000731".to_string()),
            claim_status: Field::Present("Closed".to_string()),
            created_timestamp: Field::Present(TemporalFixtures::reported_at()),
            report_date: Field::Present(TemporalFixtures::date(2024, 3, 1)),
            policy_number: Field::Present("PA-448812".to_string()),
            claimant_first_name: Field::Present("Dana".to_string()),
            claimant_last_name: Field::Present("Whitfield".to_string()),
            claimant_phone: Field::Present("+1-555-0142".to_string()),
            claimant_email: Field::Present("dana.whitfield@example.com".to_string()),
            vehicle_vin: Field::Present("1HGCM82633A004352".to_string()),
            vehicle_year: Field::Present(2019),
            vehicle_make: Field::Present("Honda".to_string()),
            vehicle_model: Field::Present("Accord".to_string()),
            loss_date: Field::Present(TemporalFixtures::date(2024, 2, 28)),
            loss_location: Field::Present("I-90 exit 17, Cleveland OH".to_string()),
            loss_type: Field::Present("Collision".to_string()),
            injury_involved: Field::Present(false),
            police_report_filed: Field::Present(true),
            accident_description: Field::Present("Rear-ended at a red light".to_string()),
            adjuster_id: Field::Present("ADJ-017".to_string()),
            coverage_confirmed: Field::Present(true),
            deductible_amount: Field::Present(500.0),
            subrogation_potential: Field::Present(true),
            triage_completed: Field::Present(TemporalFixtures::local(2024, 3, 1, 11, 0)),
            first_contact_date: Field::Present(TemporalFixtures::local(2024, 3, 1, 14, 30)),
            inspection_completed: Field::Present(TemporalFixtures::local(2024, 3, 4, 10, 15)),
            damage_assessment: Field::Present(4280.75),
            repair_authorized: Field::Present(true),
            repair_shop_name: Field::Present("Lakeside Collision Center".to_string()),
            payment_amount: Field::Present(3780.75),
            payment_date: Field::Present(TemporalFixtures::local(2024, 3, 12, 9, 0)),
            subrogation_demand_sent: Field::Present(true),
            claim_closed_date: Field::Present(TemporalFixtures::local(2024, 3, 15, 17, 45)),
            closure_reason: Field::Present("Paid".to_string()),
            cycle_time_days: Field::Present(14),
            customer_satisfaction: Field::Present(4.5),
        }
    }

    /// A fresh first-notice claim with explicit nulls for the closure fields
    pub fn open_with_nulls() -> Claim {
        Claim {
            claim_number: Field::Present("C-3003".to_string()),
            claim_status: Field::Present("Open".to_string()),
            claim_closed_date: Field::Null,
            closure_reason: Field::Null,
            cycle_time_days: Field::Null,
            ..Default::default()
        }
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A calendar date
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// An offset-qualified report timestamp
    pub fn reported_at() -> ClaimTimestamp {
        ClaimTimestamp::from(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
    }

    /// A local timestamp without offset
    pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> ClaimTimestamp {
        let dt: NaiveDateTime = Self::date(year, month, day)
            .and_hms_opt(hour, minute, 0)
            .expect("valid fixture time");
        ClaimTimestamp::from(dt)
    }
}
