use serde::{Deserialize, Serialize};

use crate::catalogs::describe_manifestations;
use crate::field_value::FilterSet;
use crate::search_const::TITLE_MAX_CHARS;
use crate::search_form::FormErrors;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResultYacimientos {
    pub query_string: String,
    pub filters: FilterSet,
    pub results: Vec<SearchResultYacimientoItem>,
    pub page_number: u64,
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "FormErrors::is_empty")]
    pub errors: FormErrors,
}

impl SearchResultYacimientos {
    /// The explicit "no results" answer for unconstrained or invalid requests.
    pub fn no_query_found(errors: FormErrors) -> Self {
        Self { errors, ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultYacimientoItem {
    pub codigo: String,
    pub nombre: String,
    pub title: String,
    pub municipio: String,
    pub estado: String,
    pub manifestaciones: String,
    pub result_index_in_page: u64,
}

impl SearchResultYacimientoItem {
    pub fn new(codigo: String, nombre: String, municipio: String, estado: String, manifestacion: &[i64]) -> Self {
        Self {
            title: yacimiento_title(&codigo, &nombre),
            manifestaciones: describe_manifestations(manifestacion),
            codigo,
            nombre,
            municipio,
            estado,
            result_index_in_page: 0,
        }
    }
}

/// `PB1-<codigo>-<nombre>`, cut to [`TITLE_MAX_CHARS`] characters.
pub fn yacimiento_title(codigo: &str, nombre: &str) -> String {
    format!("PB1-{codigo}-{nombre}").chars().take(TITLE_MAX_CHARS).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFacets {
    pub query_string: String,
    pub filters: FilterSet,
    pub facet_field: String,
    pub facet_values: Vec<SearchResultFacetItem>,
    #[serde(default, skip_serializing_if = "FormErrors::is_empty")]
    pub errors: FormErrors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFacetItem {
    pub display_string: String,
    pub original_value: FacetOriginalValue,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum FacetOriginalValue {
    Int(i64),
    String(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_truncated() {
        assert_eq!(yacimiento_title("001", "Cueva del Tigre"), "PB1-001-Cueva del Tigre");
        let long = "á".repeat(200);
        assert_eq!(yacimiento_title("001", &long).chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn test_item_describes_manifestations() {
        let item = SearchResultYacimientoItem::new(
            "ZU-7".to_string(),
            "Piedra Pintada".to_string(),
            "Mara".to_string(),
            "Zulia".to_string(),
            &[2, 3],
        );
        assert_eq!(item.manifestaciones, "Pintura Rupestre, Petroglifo");
        assert_eq!(item.title, "PB1-ZU-7-Piedra Pintada");
    }

    #[test]
    fn test_no_query_found_is_empty() {
        let result = SearchResultYacimientos::no_query_found(FormErrors::default());
        assert!(result.results.is_empty());
        assert!(result.filters.is_empty());
        assert!(!result.has_next_page);
    }
}
