//! Translation of validated form values into index constraints.

use common::field_value::{FieldValue, FilterSet, FilterValue, IN_SUFFIX, SubmittedValues};

/// Builds the constraint map for a validated request.
///
/// Every non-empty value yields exactly one key: `<field>__in` for a
/// collection, `<field>` for a scalar. Empty text, empty collections,
/// `false`, zero and absent values yield nothing, leaving the field
/// unconstrained. Field names are not checked against any form here.
pub fn build_filters(values: &SubmittedValues) -> FilterSet {
    let mut filters = FilterSet::new();
    for (field, value) in values {
        if value.is_empty() {
            continue;
        }
        match value {
            FieldValue::Collection(items) => {
                filters.insert(format!("{field}{IN_SUFFIX}"), FilterValue::In(items.clone()));
            }
            FieldValue::Scalar(scalar) => {
                filters.insert(field.clone(), FilterValue::Equals(scalar.clone()));
            }
            FieldValue::Absent => {}
        }
    }
    filters
}
