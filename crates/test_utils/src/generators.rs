//! Property-Based Test Generators
//!
//! Provides proptest strategies for claims with an arbitrary subset of fields
//! set. Floating-point values are multiples of 0.25 so they survive a JSON
//! round trip exactly.

use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;

use domain_claims::{Claim, ClaimTimestamp, Field};

/// Maps `None` to an absent field
fn absent_or<T>(value: Option<T>) -> Field<T> {
    value.map(Field::Present).unwrap_or_default()
}

/// Strategy for claim numbers
pub fn claim_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{1,3}-[0-9]{1,6}"
}

/// Strategy for the conventional claim status values
pub fn claim_status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Open".to_string()),
        Just("Triage".to_string()),
        Just("Under Review".to_string()),
        Just("Approved".to_string()),
        Just("Closed".to_string()),
    ]
}

/// Strategy for dates between 2015 and 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2030, 1u32..=365).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal).unwrap_or_default()
    })
}

/// Strategy for whole-second timestamps, with or without a UTC offset
pub fn timestamp_strategy() -> impl Strategy<Value = ClaimTimestamp> {
    (1_420_070_400i64..1_893_456_000, any::<bool>()).prop_map(|(secs, zoned)| {
        let utc = DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();
        if zoned {
            ClaimTimestamp::from(utc)
        } else {
            ClaimTimestamp::from(utc.naive_utc())
        }
    })
}

/// Strategy for non-negative amounts in quarter units
pub fn amount_strategy() -> impl Strategy<Value = f64> {
    (0u32..4_000_000).prop_map(|quarters| quarters as f64 / 4.0)
}

prop_compose! {
    /// Strategy for claims with a random subset of fields set
    pub fn partial_claim_strategy()(
        claim_number in proptest::option::of(claim_number_strategy()),
        claim_status in proptest::option::of(claim_status_strategy()),
        created_timestamp in proptest::option::of(timestamp_strategy()),
        policy_number in proptest::option::of("P-[0-9]{2,6}"),
        vehicle_year in proptest::option::of(1950i32..2030),
        loss_date in proptest::option::of(date_strategy()),
        injury_involved in proptest::option::of(any::<bool>()),
        deductible_amount in proptest::option::of(amount_strategy()),
        payment_date in proptest::option::of(timestamp_strategy()),
        cycle_time_days in proptest::option::of(0i64..720),
        customer_satisfaction in proptest::option::of((0u32..=20).prop_map(|n| n as f64 / 4.0)),
    ) -> Claim {
        Claim {
            claim_number: absent_or(claim_number),
            claim_status: absent_or(claim_status),
            created_timestamp: absent_or(created_timestamp),
            policy_number: absent_or(policy_number),
            vehicle_year: absent_or(vehicle_year),
            loss_date: absent_or(loss_date),
            injury_involved: absent_or(injury_involved),
            deductible_amount: absent_or(deductible_amount),
            payment_date: absent_or(payment_date),
            cycle_time_days: absent_or(cycle_time_days),
            customer_satisfaction: absent_or(customer_satisfaction),
            ..Default::default()
        }
    }
}
