//! Basic and advanced search forms: field catalogs and request validation.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalogs::{self, ChoiceKey};
use crate::field_spec::{FieldDescription, FieldKind, FieldSpec};
use crate::field_value::{FieldValue, Scalar, SubmittedValues};
use crate::search_const::MAX_PAGE;
use crate::search_query::SearchQuery;

/// Free-text query parameter. Not a form field, never becomes a filter.
pub const QUERY_STRING_PARAM: &str = "q";
pub const PAGE_PARAM: &str = "page";

pub const DATE_INPUT_FORMATS: [&str; 2] = ["%d-%m-%Y", "%d/%m/%Y"];

const BASIC_FIELDS: [FieldSpec; 6] = [
    FieldSpec::text("nombre", "1. Nombre(s) del Yacimiento", 100),
    FieldSpec::text("municipio", "2. Municipio", 150),
    FieldSpec::choice("estado", "3. Estado/Provincia", &catalogs::ESTADO),
    FieldSpec::boolean("hayFotografia", "Posee fotografías"),
    FieldSpec::choice("manifestacion", "13. Tipo de Manifestación", &catalogs::TIPO_MANIFESTACION),
    FieldSpec::choice("orientacion", "15. Orientación", &catalogs::ORIENTACION),
];

const ADVANCED_FIELDS: &[FieldSpec] = &[
    BASIC_FIELDS[0],
    BASIC_FIELDS[1],
    BASIC_FIELDS[2],
    BASIC_FIELDS[3],
    BASIC_FIELDS[4],
    BASIC_FIELDS[5],
    FieldSpec::text("codigo", "(00). Código ANAR", 20),
    FieldSpec::choice("localidad", "4. Localidad", &catalogs::LOCALIDAD),
    FieldSpec::text("nombreLocalidad", "4.1. Nombre de la Localidad", 150),
    FieldSpec::choice("fotografia", "11. Fotografía", &catalogs::FOTOGRAFIA),
    FieldSpec::date("fechaFotografia", "11.1. Fecha de la Fotografía"),
    FieldSpec::choice("suelo", "5. Uso Actual del Suelo", &catalogs::SUELO),
    FieldSpec::choice("tipo", "12. Tipo de Yacimiento", &catalogs::TIPO_YACIMIENTO),
    FieldSpec::choice("hidrologia", "19. Hidrología", &catalogs::HIDROLOGIA),
    FieldSpec::choice("exposicion", "20. Tipo de Exposición", &catalogs::EXPOSICION),
    FieldSpec::integer("nroPiedras", "21. Número de Piedras"),
    FieldSpec::integer("nroPiedrasGrabadas", "21.1. Piedras Grabadas"),
    FieldSpec::integer("nroPiedrasPintadas", "21.2. Piedras Pintadas"),
    FieldSpec::integer("nroPiedrasColocadas", "21.3. Piedras Colocadas"),
    FieldSpec::choice("ubicacion", "14. Ubicación de la Manifestación", &catalogs::UBICACION_MANIFESTACION),
    FieldSpec::choice("material", "22. Material", &catalogs::MATERIAL),
    FieldSpec::text("tecnicaGeoglifo", "23.1. Técnica Geoglifo", 400),
    FieldSpec::choice("tecnicaPintura", "23.2. Técnica Pintura", &catalogs::TECNICA_PINTURA),
    FieldSpec::choice("tecnicaPetroglifo", "23.3. Técnica Petroglifo", &catalogs::TECNICA_PETROGLIFO),
    FieldSpec::choice("tecnicaMicroPetro", "23.4. Técnica Micro-Petroglifo", &catalogs::TECNICA_PETROGLIFO),
    FieldSpec::choice("tipoMonumento", "23.5. Tipo de Monumento", &catalogs::MONUMENTO),
    FieldSpec::text("tecnicaMonumento", "23.5.1. Técnica Monumento", 400),
    FieldSpec::boolean("patinaConsider", "28. Pátina"),
    FieldSpec::text("otrosConsider", "28.1. Otras Consideraciones", 400),
    FieldSpec::choice("manifestAsociadas", "30. Manifestaciones Asociadas", &catalogs::MANIFESTACIONES_ASOCIADAS),
    FieldSpec::text("otrosValores", "33. Otros Valores del Sitio", 150),
    FieldSpec::text("observaciones", "34. Observaciones", 150),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchForm {
    #[default]
    Basic,
    Advanced,
}

impl FromStr for SearchForm {
    type Err = UnknownSearchForm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(SearchForm::Basic),
            "advanced" => Ok(SearchForm::Advanced),
            other => Err(UnknownSearchForm(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown search form: {0}")]
pub struct UnknownSearchForm(pub String);

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Ensure this value has at most {max_length} characters (it has {length}).")]
    TooLong { max_length: usize, length: usize },

    #[error("Enter a whole number, got {0:?}.")]
    InvalidInteger(String),

    #[error("Ensure this value is less than or equal to {0}.")]
    TooLarge(u64),

    #[error("Enter a valid date (dd-mm-yyyy or dd/mm/yyyy), got {0:?}.")]
    InvalidDate(String),

    #[error("Select a valid choice. {0} is not one of the available choices.")]
    InvalidChoice(String),
}

/// Validation errors collected per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, error: FieldError) {
        self.0.entry(field.to_string()).or_default().push(error.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|v| v.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .0
            .iter()
            .map(|(field, errors)| format!("{field}: {}", errors.join(" ")))
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join("; "))
    }
}

impl SearchForm {
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            SearchForm::Basic => &BASIC_FIELDS,
            SearchForm::Advanced => ADVANCED_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    pub fn describe(&self) -> Vec<FieldDescription> {
        self.fields().iter().map(|f| f.describe()).collect()
    }

    /// Validates raw query-string pairs against this form's fields.
    ///
    /// Repeated names form the value list of multi-valued fields; for
    /// single-valued fields the last submission wins. Names the form does
    /// not declare are ignored. Every declared field is present in the
    /// output, `Absent` when nothing was submitted for it.
    pub fn validate(&self, raw: &[(String, String)]) -> Result<SubmittedValues, FormErrors> {
        let mut values = SubmittedValues::new();
        let mut errors = FormErrors::default();

        for spec in self.fields() {
            let submitted = raw
                .iter()
                .filter(|(name, _)| name == spec.name)
                .map(|(_, value)| value.as_str())
                .collect::<Vec<_>>();

            match clean_field(spec, &submitted) {
                Ok(value) => {
                    values.insert(spec.name.to_string(), value);
                }
                Err(field_errors) => {
                    for e in field_errors {
                        errors.add(spec.name, e);
                    }
                }
            }
        }

        if errors.is_empty() { Ok(values) } else { Err(errors) }
    }

    /// Splits off the free-text query and page number, then validates the rest.
    pub fn parse_request(&self, raw: &[(String, String)]) -> Result<SearchQuery, FormErrors> {
        let query_string = last_value(raw, QUERY_STRING_PARAM).unwrap_or_default().trim().to_string();

        let mut errors = FormErrors::default();
        let page = match last_value(raw, PAGE_PARAM).map(str::trim) {
            None | Some("") => 0,
            Some(p) => match p.parse::<u64>() {
                Ok(p) if p <= MAX_PAGE => p,
                Ok(_) => {
                    errors.add(PAGE_PARAM, FieldError::TooLarge(MAX_PAGE));
                    0
                }
                Err(_) => {
                    errors.add(PAGE_PARAM, FieldError::InvalidInteger(p.to_string()));
                    0
                }
            },
        };

        let values = match self.validate(raw) {
            Ok(values) => values,
            Err(field_errors) => {
                errors.0.extend(field_errors.0);
                return Err(errors);
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SearchQuery { form: *self, query_string, values, page })
    }
}

fn last_value<'a>(raw: &'a [(String, String)], name: &str) -> Option<&'a str> {
    raw.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
}

fn clean_field(spec: &FieldSpec, submitted: &[&str]) -> Result<FieldValue, Vec<FieldError>> {
    let value = match spec.kind {
        FieldKind::Choice(catalog) => {
            let mut keys: Vec<Scalar> = Vec::new();
            let mut errors = Vec::new();
            for raw in submitted.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
                match catalog.parse_key(raw) {
                    Some(key) => {
                        let key = match key {
                            ChoiceKey::Int(i) => Scalar::Int(i),
                            ChoiceKey::Str(s) => Scalar::Text(s.to_string()),
                        };
                        if !keys.contains(&key) {
                            keys.push(key);
                        }
                    }
                    None => errors.push(FieldError::InvalidChoice(raw.to_string())),
                }
            }
            if !errors.is_empty() {
                return Err(errors);
            }
            if keys.is_empty() { FieldValue::Absent } else { FieldValue::Collection(keys) }
        }
        FieldKind::Boolean => {
            let checked = submitted.last().map(|raw| {
                let raw = raw.trim().to_lowercase();
                !(raw.is_empty() || raw == "false" || raw == "0")
            });
            FieldValue::Scalar(Scalar::Bool(checked.unwrap_or(false)))
        }
        FieldKind::Text { max_length } => match submitted.last().map(|s| s.trim()) {
            None => FieldValue::Absent,
            Some(text) => {
                let length = text.chars().count();
                if length > max_length {
                    return Err(vec![FieldError::TooLong { max_length, length }]);
                }
                FieldValue::Scalar(Scalar::Text(text.to_string()))
            }
        },
        FieldKind::Integer => match submitted.last().map(|s| s.trim()) {
            None | Some("") => FieldValue::Absent,
            Some(raw) => match raw.parse::<i64>() {
                Ok(i) => FieldValue::Scalar(Scalar::Int(i)),
                Err(_) => return Err(vec![FieldError::InvalidInteger(raw.to_string())]),
            },
        },
        FieldKind::Date => match submitted.last().map(|s| s.trim()) {
            None | Some("") => FieldValue::Absent,
            Some(raw) => match parse_date(raw) {
                Some(date) => FieldValue::Scalar(Scalar::Date(date)),
                None => return Err(vec![FieldError::InvalidDate(raw.to_string())]),
            },
        },
    };

    if spec.required && value.is_empty() {
        return Err(vec![FieldError::Required]);
    }
    Ok(value)
}

/// Parses `dd-mm-yyyy` or `dd/mm/yyyy`. The year must have exactly four digits.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let year = raw.rsplit(['-', '/']).next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
