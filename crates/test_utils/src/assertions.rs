//! Custom Test Assertions
//!
//! Assertion helpers for claim rows that report which field differs.

use serde_json::Value;

use domain_claims::Claim;

/// Checks that every field set on `supplied` has the same value on `row`
///
/// Fields absent from `supplied` are ignored, so a stored row that carries
/// extra columns or store-filled nulls still matches.
///
/// # Returns
///
/// The name of the first mismatched field on failure
pub fn claim_contains(row: &Claim, supplied: &Claim) -> Result<(), String> {
    let row = serde_json::to_value(row).map_err(|e| e.to_string())?;
    let supplied = serde_json::to_value(supplied).map_err(|e| e.to_string())?;

    let (Value::Object(row), Value::Object(supplied)) = (row, supplied) else {
        return Err("claims must serialize as JSON objects".to_string());
    };

    for (field, expected) in &supplied {
        let actual = row.get(field).unwrap_or(&Value::Null);
        if actual != expected {
            return Err(format!(
                "Claim field '{}' differs: expected {}, got {}",
                field, expected, actual
            ));
        }
    }
    Ok(())
}

/// Asserts that every field set on `supplied` has the same value on `row`
///
/// # Panics
///
/// Panics naming the first mismatched field
pub fn assert_claim_contains(row: &Claim, supplied: &Claim) {
    if let Err(mismatch) = claim_contains(row, supplied) {
        panic!("{}", mismatch);
    }
}

/// Asserts that some row in `rows` contains all fields set on `supplied`
pub fn assert_any_claim_contains(rows: &[Claim], supplied: &Claim) {
    assert!(
        rows.iter().any(|row| claim_contains(row, supplied).is_ok()),
        "No row among {} contains claim {:?}",
        rows.len(),
        supplied.claim_number()
    );
}

/// Asserts that no row carries the given claim number
pub fn assert_claim_number_absent(rows: &[Claim], claim_number: &str) {
    assert!(
        rows.iter().all(|r| r.claim_number() != Some(claim_number)),
        "Claim {} is still present",
        claim_number
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::Field;

    #[test]
    fn test_contains_ignores_absent_fields() {
        let supplied = Claim::with_claim_number("C-1");
        let mut row = supplied.clone();
        row.claim_status = Field::Null;
        row.vehicle_year = Field::Present(2020);

        assert_claim_contains(&row, &supplied);
    }

    #[test]
    #[should_panic(expected = "vehicle_year")]
    fn test_contains_reports_mismatch() {
        let mut supplied = Claim::with_claim_number("C-1");
        supplied.vehicle_year = Field::Present(2020);
        let row = Claim::with_claim_number("C-1");

        assert_claim_contains(&row, &supplied);
    }
}
