use crate::api::search::search_sql::{SQL_OPTIONS_CLAUSE, build_sql_where_clause};
use crate::api::search::{PreparedSearch, prepare_search};
use crate::db_utils::manticore_utils::SearchBackend;
use common::search_form::SearchForm;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchForResultsHitCountResponse {
    pub total_count: u64,
}

pub async fn search_for_results_hit_count(
    backend: &SearchBackend,
    form: SearchForm,
    raw: &[(String, String)],
) -> anyhow::Result<u64> {
    let (query, filters) = match prepare_search(form, raw) {
        PreparedSearch::NoQuery(_) => return Ok(0),
        PreparedSearch::Ready { query, filters } => (query, filters),
    };
    let sql_where_clause = build_sql_where_clause(&query.query_string, &filters)?;
    let index = &backend.index_name;
    let sql = format!(
        "
        SELECT COUNT(*) AS total_count
        FROM {index}
        {sql_where_clause}
        {SQL_OPTIONS_CLAUSE}
        ;",
    );
    let response = backend.manticore_search_sql::<SearchForResultsHitCountResponse>(sql).await?;
    let response = response.hits.hits;
    if response.is_empty() {
        return Ok(0);
    }
    Ok(response[0]._source.total_count)
}
