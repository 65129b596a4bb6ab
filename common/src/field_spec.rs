//! Static declarations of searchable fields.

use serde::Serialize;

use crate::catalogs::{Catalog, ChoiceKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { max_length: usize },
    Integer,
    Boolean,
    Date,
    Choice(&'static Catalog),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str, max_length: usize) -> Self {
        Self { name, label, kind: FieldKind::Text { max_length }, required: false }
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Integer, required: false }
    }

    pub const fn boolean(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Boolean, required: false }
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Date, required: false }
    }

    pub const fn choice(name: &'static str, label: &'static str, catalog: &'static Catalog) -> Self {
        Self { name, label, kind: FieldKind::Choice(catalog), required: false }
    }

    pub const fn cardinality(&self) -> Cardinality {
        match self.kind {
            FieldKind::Choice(_) => Cardinality::Multiple,
            _ => Cardinality::Single,
        }
    }

    pub fn catalog(&self) -> Option<&'static Catalog> {
        match self.kind {
            FieldKind::Choice(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn describe(&self) -> FieldDescription {
        let (kind, max_length, choices) = match self.kind {
            FieldKind::Text { max_length } => ("text", Some(max_length), vec![]),
            FieldKind::Integer => ("integer", None, vec![]),
            FieldKind::Boolean => ("boolean", None, vec![]),
            FieldKind::Date => ("date", None, vec![]),
            FieldKind::Choice(catalog) => (
                "choice",
                None,
                catalog
                    .options
                    .iter()
                    .map(|(key, label)| ChoiceDescription { key: *key, label: *label })
                    .collect(),
            ),
        };
        FieldDescription {
            name: self.name,
            label: self.label,
            kind,
            cardinality: self.cardinality(),
            required: self.required,
            max_length,
            choices,
        }
    }
}

/// Serializable view of a [`FieldSpec`], used to render search forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescription {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub cardinality: Cardinality,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceDescription {
    pub key: ChoiceKey,
    pub label: &'static str,
}
