//! Submitted search values and the constraint map built from them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One submitted value. Dates travel as `{"date": "YYYY-MM-DD"}` so that
/// date-shaped text stays text on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Date(#[serde(with = "date_wire")] NaiveDate),
    Text(String),
}

mod date_wire {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct DateWire {
        date: NaiveDate,
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        DateWire { date: *date }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        DateWire::deserialize(deserializer).map(|wire| wire.date)
    }
}

impl Scalar {
    /// Falsy scalars leave a field unconstrained.
    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Bool(b) => !b,
            Scalar::Int(i) => *i == 0,
            Scalar::Date(_) => false,
            Scalar::Text(s) => s.is_empty(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(value: NaiveDate) -> Self {
        Scalar::Date(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Scalar(Scalar),
    Collection(Vec<Scalar>),
    #[default]
    Absent,
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => s.is_empty(),
            FieldValue::Collection(values) => values.is_empty(),
            FieldValue::Absent => true,
        }
    }

    pub fn collection<T: Into<Scalar>>(values: impl IntoIterator<Item = T>) -> Self {
        FieldValue::Collection(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! field_value_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                FieldValue::Scalar(value.into())
            }
        })*
    };
}

field_value_from_scalar!(&str, String, i64, bool, NaiveDate);

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}

/// Validated values of one search request, keyed by field name.
pub type SubmittedValues = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    In(Vec<Scalar>),
    Equals(Scalar),
}

/// Constraints handed to the search index: `field` for equality,
/// `field__in` for membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, FilterValue>);

pub const IN_SUFFIX: &str = "__in";

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FilterValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// Drops every constraint derived from `field`, whichever key form it took.
    pub fn remove_field(&mut self, field: &str) {
        self.0.remove(field);
        self.0.remove(&format!("{field}{IN_SUFFIX}"));
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = (&'a String, &'a FilterValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::Absent.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::from(false).is_empty());
        assert!(FieldValue::from(0_i64).is_empty());
        assert!(FieldValue::Collection(vec![]).is_empty());
    }

    #[test]
    fn test_non_empty_values() {
        assert!(!FieldValue::from("Baruta").is_empty());
        assert!(!FieldValue::from(true).is_empty());
        assert!(!FieldValue::from(7_i64).is_empty());
        assert!(!FieldValue::collection([3_i64]).is_empty());
        let date = NaiveDate::from_ymd_opt(2013, 4, 1).unwrap();
        assert!(!FieldValue::from(date).is_empty());
    }

    #[test]
    fn test_filter_set_serializes_as_plain_map() {
        let mut filters = FilterSet::new();
        filters.insert("nombre", FilterValue::Equals("Cueva del Tigre".into()));
        filters.insert("manifestacion__in", FilterValue::In(vec![Scalar::Int(3)]));
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"manifestacion__in": [3], "nombre": "Cueva del Tigre"})
        );
    }

    #[test]
    fn test_remove_field_drops_both_key_forms() {
        let mut filters = FilterSet::new();
        filters.insert("estado__in", FilterValue::In(vec!["Lara".into()]));
        filters.insert("nombre", FilterValue::Equals("x".into()));
        filters.remove_field("estado");
        assert!(!filters.contains_key("estado__in"));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_date_shaped_text_stays_text() {
        let text = Scalar::Text("2013-04-01".to_string());
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#""2013-04-01""#);
        assert_eq!(serde_json::from_str::<Scalar>(&json).unwrap(), text);

        let date = Scalar::Date(NaiveDate::from_ymd_opt(2013, 4, 1).unwrap());
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"date":"2013-04-01"}"#);
        assert_eq!(serde_json::from_str::<Scalar>(&json).unwrap(), date);
    }

    #[test]
    fn test_filter_set_round_trip() {
        let date = NaiveDate::from_ymd_opt(2013, 4, 1).unwrap();
        let mut filters = FilterSet::new();
        filters.insert("nombre", FilterValue::Equals("2013-04-01".into()));
        filters.insert("fechaFotografia", FilterValue::Equals(Scalar::Date(date)));
        filters.insert("tieneFotografia", FilterValue::Equals(Scalar::Bool(true)));
        filters.insert("manifestacion__in", FilterValue::In(vec![Scalar::Int(3), Scalar::Int(5)]));
        filters.insert("estado__in", FilterValue::In(vec!["Zulia".into()]));
        let json = serde_json::to_string(&filters).unwrap();
        assert_eq!(serde_json::from_str::<FilterSet>(&json).unwrap(), filters);
    }

    #[test]
    fn test_submitted_values_round_trip() {
        let date = NaiveDate::from_ymd_opt(2013, 4, 1).unwrap();
        let values = SubmittedValues::from([
            ("nombre".to_string(), FieldValue::from("2013-04-01")),
            ("fechaFotografia".to_string(), FieldValue::from(date)),
            ("nroPiedras".to_string(), FieldValue::from(12_i64)),
            ("tieneFotografia".to_string(), FieldValue::from(false)),
            ("manifestacion".to_string(), FieldValue::collection([1_i64, 3])),
            ("municipio".to_string(), FieldValue::Absent),
        ]);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(serde_json::from_str::<SubmittedValues>(&json).unwrap(), values);
    }
}
