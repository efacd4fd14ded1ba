//! Tri-state record fields
//!
//! A claim write carries only the fields the caller supplied. `Field<T>`
//! records whether a field was left out entirely, sent as an explicit
//! `null`, or sent with a value, so serialization can drop absent fields
//! while still forwarding explicit nulls.
//!
//! Use `#[serde(default, skip_serializing_if = "Field::is_absent")]` on each
//! struct field: `default` turns a missing key into `Absent`, and the skip
//! keeps `Absent` off the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that may be absent, explicitly null, or present with a value
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Not supplied by the caller
    Absent,
    /// Supplied as an explicit `null`
    Null,
    /// Supplied with a value
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    /// Returns true when the field was not supplied
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Returns true when the field was supplied, either as null or with a value
    pub fn is_set(&self) -> bool {
        !self.is_absent()
    }

    /// Returns the value if one is present
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Present(value)
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// Maps `None` to an explicit null, not to `Absent`
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Present(value),
            None => Field::Null,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => value.serialize(serializer),
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Row {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        name: Field<String>,
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        year: Field<i32>,
    }

    #[test]
    fn test_missing_key_is_absent() {
        let row: Row = serde_json::from_str(r#"{"year": 2020}"#).unwrap();
        assert!(row.name.is_absent());
        assert_eq!(row.year, Field::Present(2020));
    }

    #[test]
    fn test_explicit_null_is_kept() {
        let row: Row = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(row.name, Field::Null);
        assert!(row.name.is_set());

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"name":null}"#);
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let json = serde_json::to_string(&Row::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"year": "2020"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_accessors() {
        let field: Field<i32> = 7.into();
        assert_eq!(field.value(), Some(&7));
        assert_eq!(Field::<i32>::Null.value(), None);
        assert_eq!(Field::<i32>::from(None::<i32>), Field::Null);
    }
}
