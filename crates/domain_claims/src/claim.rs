//! Claim record
//!
//! The façade stores claims as flat rows in a hosted table. Every column is
//! optional and no business rules apply here; the record only guarantees that
//! each supplied field has the right primitive type.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InvalidTimestamp;
use crate::field::Field;

/// Accepted layouts once the date/time separator is `T` and `Z` is `+00:00`
const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];
const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// A point in time as stored in a claim column
///
/// Hosted tables hand back offset-qualified values for `timestamptz` columns
/// and bare local values for `timestamp` columns. Both forms are accepted and
/// written back in the form they arrived in.
///
/// Input is lenient ISO 8601: `T` or a space between date and time, seconds
/// and fractions optional, and an optional `Z` or `+HH:MM` offset. Output is
/// always the canonical `T`-separated form with seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClaimTimestamp {
    /// Timestamp carrying a UTC offset, e.g. `2024-03-01T09:30:00+02:00`
    Zoned(DateTime<FixedOffset>),
    /// Timestamp without offset, e.g. `2024-03-01T09:30:00`
    Local(NaiveDateTime),
}

impl FromStr for ClaimTimestamp {
    type Err = InvalidTimestamp;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = normalize_timestamp(raw);

        ZONED_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(&text, format).ok())
            .map(ClaimTimestamp::Zoned)
            .or_else(|| {
                LOCAL_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
                    .map(ClaimTimestamp::Local)
            })
            .ok_or_else(|| InvalidTimestamp(raw.to_string()))
    }
}

impl<'de> Deserialize<'de> for ClaimTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Rewrites a space separator to `T` and a trailing `Z` to `+00:00`
fn normalize_timestamp(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    if text.get(10..11) == Some(" ") {
        text.replace_range(10..11, "T");
    }
    if text.ends_with('Z') || text.ends_with('z') {
        text.pop();
        text.push_str("+00:00");
    }
    text
}

impl From<DateTime<Utc>> for ClaimTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        ClaimTimestamp::Zoned(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for ClaimTimestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        ClaimTimestamp::Zoned(value)
    }
}

impl From<NaiveDateTime> for ClaimTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        ClaimTimestamp::Local(value)
    }
}

impl fmt::Display for ClaimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimTimestamp::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
            ClaimTimestamp::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// An auto insurance claim row
///
/// Fields are grouped the way the table groups its columns: identity,
/// claimant contact, vehicle, loss, adjuster and coverage, financials,
/// and closure. Any subset may be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    // Identity
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub claim_number: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub claim_status: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub created_timestamp: Field<ClaimTimestamp>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub report_date: Field<NaiveDate>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub policy_number: Field<String>,

    // Claimant contact
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub claimant_first_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub claimant_last_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub claimant_phone: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub claimant_email: Field<String>,

    // Vehicle
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub vehicle_vin: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub vehicle_year: Field<i32>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub vehicle_make: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub vehicle_model: Field<String>,

    // Loss
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub loss_date: Field<NaiveDate>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub loss_location: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub loss_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub injury_involved: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub police_report_filed: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub accident_description: Field<String>,

    // Adjuster and coverage
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub adjuster_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub coverage_confirmed: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub deductible_amount: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub subrogation_potential: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub triage_completed: Field<ClaimTimestamp>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub first_contact_date: Field<ClaimTimestamp>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub inspection_completed: Field<ClaimTimestamp>,

    // Financials
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub damage_assessment: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub repair_authorized: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub repair_shop_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub payment_amount: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub payment_date: Field<ClaimTimestamp>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub subrogation_demand_sent: Field<bool>,

    // Closure
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub claim_closed_date: Field<ClaimTimestamp>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub closure_reason: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cycle_time_days: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub customer_satisfaction: Field<f64>,
}

impl Claim {
    /// Creates a claim with only the claim number set
    pub fn with_claim_number(claim_number: impl Into<String>) -> Self {
        Self {
            claim_number: Field::Present(claim_number.into()),
            ..Default::default()
        }
    }

    /// Returns the claim number if one is set
    pub fn claim_number(&self) -> Option<&str> {
        self.claim_number.value().map(String::as_str)
    }

    /// Names of the fields the caller supplied, in column order
    ///
    /// Used for logging what a write will touch without logging values.
    pub fn supplied_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("claim_number", self.claim_number.is_set()),
            ("claim_status", self.claim_status.is_set()),
            ("created_timestamp", self.created_timestamp.is_set()),
            ("report_date", self.report_date.is_set()),
            ("policy_number", self.policy_number.is_set()),
            ("claimant_first_name", self.claimant_first_name.is_set()),
            ("claimant_last_name", self.claimant_last_name.is_set()),
            ("claimant_phone", self.claimant_phone.is_set()),
            ("claimant_email", self.claimant_email.is_set()),
            ("vehicle_vin", self.vehicle_vin.is_set()),
            ("vehicle_year", self.vehicle_year.is_set()),
            ("vehicle_make", self.vehicle_make.is_set()),
            ("vehicle_model", self.vehicle_model.is_set()),
            ("loss_date", self.loss_date.is_set()),
            ("loss_location", self.loss_location.is_set()),
            ("loss_type", self.loss_type.is_set()),
            ("injury_involved", self.injury_involved.is_set()),
            ("police_report_filed", self.police_report_filed.is_set()),
            ("accident_description", self.accident_description.is_set()),
            ("adjuster_id", self.adjuster_id.is_set()),
            ("coverage_confirmed", self.coverage_confirmed.is_set()),
            ("deductible_amount", self.deductible_amount.is_set()),
            ("subrogation_potential", self.subrogation_potential.is_set()),
            ("triage_completed", self.triage_completed.is_set()),
            ("first_contact_date", self.first_contact_date.is_set()),
            ("inspection_completed", self.inspection_completed.is_set()),
            ("damage_assessment", self.damage_assessment.is_set()),
            ("repair_authorized", self.repair_authorized.is_set()),
            ("repair_shop_name", self.repair_shop_name.is_set()),
            ("payment_amount", self.payment_amount.is_set()),
            ("payment_date", self.payment_date.is_set()),
            ("subrogation_demand_sent", self.subrogation_demand_sent.is_set()),
            ("claim_closed_date", self.claim_closed_date.is_set()),
            ("closure_reason", self.closure_reason.is_set()),
            ("cycle_time_days", self.cycle_time_days.is_set()),
            ("customer_satisfaction", self.customer_satisfaction.is_set()),
        ];

        flags
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    const FULL_ROW: &str = r#"{
        "claim_number": "C-1", "claim_status": "Closed", "created_timestamp": "2024-03-01T09:30:00Z",
        "report_date": "2024-03-01", "policy_number": "P-1", "claimant_first_name": "Ada",
        "claimant_last_name": "Lovelace", "claimant_phone": "555-0100", "claimant_email": "ada@example.com",
        "vehicle_vin": "1HGCM82633A004352", "vehicle_year": 2019, "vehicle_make": "Honda",
        "vehicle_model": "Accord", "loss_date": "2024-02-28", "loss_location": "Springfield",
        "loss_type": "Collision", "injury_involved": false, "police_report_filed": true,
        "accident_description": "Rear-ended at a light", "adjuster_id": "ADJ-7",
        "coverage_confirmed": true, "deductible_amount": 500.0, "subrogation_potential": true,
        "triage_completed": "2024-03-01T10:00:00", "first_contact_date": "2024-03-01T11:00:00",
        "inspection_completed": "2024-03-04 14:00", "damage_assessment": 3200.5,
        "repair_authorized": true, "repair_shop_name": "Main St Auto", "payment_amount": 2700.5,
        "payment_date": "2024-03-10T12:00:00+00:00", "subrogation_demand_sent": true,
        "claim_closed_date": "2024-03-12T16:45:00", "closure_reason": "Paid",
        "cycle_time_days": 11, "customer_satisfaction": 4.5
    }"#;

    #[test]
    fn test_zoned_timestamp_parses_and_keeps_offset() {
        let ts: ClaimTimestamp = serde_json::from_str(r#""2024-03-01T09:30:00+02:00""#).unwrap();
        match ts {
            ClaimTimestamp::Zoned(dt) => {
                assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
                assert_eq!(dt.hour(), 9);
            }
            ClaimTimestamp::Local(_) => panic!("Expected zoned timestamp"),
        }
    }

    #[test]
    fn test_local_timestamp_parses() {
        let ts: ClaimTimestamp = serde_json::from_str(r#""2024-03-01T09:30:00""#).unwrap();
        assert!(matches!(ts, ClaimTimestamp::Local(_)));
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00");
    }

    #[test]
    fn test_utc_timestamp_display() {
        let ts = ClaimTimestamp::from(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00+00:00");
    }

    #[test]
    fn test_space_separated_timestamp_parses() {
        let ts: ClaimTimestamp = serde_json::from_str(r#""2024-03-01 09:30:00""#).unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00");
    }

    #[test]
    fn test_minute_precision_timestamp_parses() {
        let ts: ClaimTimestamp = serde_json::from_str(r#""2024-03-01T09:30""#).unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00");
    }

    #[test]
    fn test_zulu_timestamps_parse_as_utc() {
        let expected = ClaimTimestamp::from(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());

        for raw in ["2024-03-01T09:30Z", "2024-03-01T09:30:00Z", "2024-03-01 09:30:00z"] {
            assert_eq!(raw.parse::<ClaimTimestamp>().unwrap(), expected, "{}", raw);
        }
    }

    #[test]
    fn test_space_separated_timestamp_with_offset_parses() {
        let ts: ClaimTimestamp = "2024-03-01 09:30:15.250-05:00".parse().unwrap();
        match ts {
            ClaimTimestamp::Zoned(dt) => {
                assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
                assert_eq!(dt.second(), 15);
                assert_eq!(dt.nanosecond(), 250_000_000);
            }
            ClaimTimestamp::Local(_) => panic!("Expected zoned timestamp"),
        }
        assert_eq!(ts.to_string(), "2024-03-01T09:30:15.250-05:00");
    }

    #[test]
    fn test_compact_offset_parses() {
        let ts: ClaimTimestamp = "2024-03-01T09:30:00+0200".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T09:30:00+02:00");
    }

    #[test]
    fn test_garbage_timestamp_is_rejected() {
        let result: Result<ClaimTimestamp, _> = serde_json::from_str(r#""yesterday""#);
        assert!(result.is_err());

        let err = "2024-03-01".parse::<ClaimTimestamp>().unwrap_err();
        assert_eq!(err, InvalidTimestamp("2024-03-01".to_string()));
    }

    #[test]
    fn test_non_string_timestamp_is_rejected() {
        let result: Result<ClaimTimestamp, _> = serde_json::from_str("1709285400");
        assert!(result.is_err());
    }

    #[test]
    fn test_fully_populated_claim_reports_every_column() {
        let claim: Claim = serde_json::from_str(FULL_ROW).unwrap();

        let supplied = claim.supplied_fields();
        assert_eq!(supplied.len(), 36);
        assert_eq!(supplied.first(), Some(&"claim_number"));
        assert_eq!(supplied.last(), Some(&"customer_satisfaction"));
    }

    #[test]
    fn test_empty_claim_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Claim::default()).unwrap(), "{}");
        assert!(Claim::default().supplied_fields().is_empty());
    }

    #[test]
    fn test_supplied_fields_follow_column_order() {
        let claim = Claim {
            vehicle_year: Field::Present(2020),
            claim_number: Field::Present("C-1001".to_string()),
            closure_reason: Field::Null,
            ..Default::default()
        };

        assert_eq!(
            claim.supplied_fields(),
            vec!["claim_number", "vehicle_year", "closure_reason"]
        );
    }

    #[test]
    fn test_dates_serialize_as_iso() {
        let claim = Claim {
            loss_date: Field::Present(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&claim).unwrap(),
            r#"{"loss_date":"2024-02-28"}"#
        );
    }
}
