//! Search operations and module exports.

use common::{field_value::FilterSet, search_form::{FormErrors, SearchForm}, search_query::SearchQuery};

mod search_for_results;
pub use search_for_results::search_for_results;

mod search_for_results_hit_count;
pub use search_for_results_hit_count::{SearchForResultsHitCountResponse, search_for_results_hit_count};

mod search_facets;
pub use search_facets::search_facet;

pub mod search_filters;
pub mod search_sql;

/// Outcome of validating a search request before the index is consulted.
#[derive(Debug, PartialEq)]
pub enum PreparedSearch {
    /// Invalid or unconstrained request, answered with no results.
    NoQuery(FormErrors),
    Ready { query: SearchQuery, filters: FilterSet },
}

pub fn prepare_search(form: SearchForm, raw: &[(String, String)]) -> PreparedSearch {
    let query = match form.parse_request(raw) {
        Ok(query) => query,
        Err(errors) => {
            tracing::info!(?form, %errors, "search form did not validate");
            return PreparedSearch::NoQuery(errors);
        }
    };
    if query.is_unconstrained() {
        tracing::debug!(?form, "empty search request");
        return PreparedSearch::NoQuery(FormErrors::default());
    }
    let filters = search_filters::build_filters(&query.values);
    PreparedSearch::Ready { query, filters }
}
