//! Shared search query models and helpers.

use serde::{Deserialize, Serialize};

use crate::field_value::SubmittedValues;
use crate::search_form::SearchForm;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    pub form: SearchForm,
    pub query_string: String,
    pub values: SubmittedValues,
    pub page: u64,
}

impl SearchQuery {
    /// True when the request constrains nothing: blank query string and
    /// every submitted value empty. Such a request matches no results.
    pub fn is_unconstrained(&self) -> bool {
        self.query_string.trim().is_empty() && self.values.values().all(|v| v.is_empty())
    }
}
