//! Search endpoint for result lists.

use common::{
    search_const::PAGE_SIZE,
    search_form::SearchForm,
    search_result::{SearchResultYacimientoItem, SearchResultYacimientos},
};
use serde::{Deserialize, Serialize};
use crate::api::search::search_sql::{RESULT_COLUMNS, SQL_OPTIONS_CLAUSE, build_sql_where_clause};
use crate::api::search::{PreparedSearch, prepare_search};
use crate::db_utils::manticore_utils::SearchBackend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SearchForResultsResponse {
    #[serde(default)]
    codigo: String,
    #[serde(default)]
    nombre: String,
    #[serde(default)]
    municipio: String,
    #[serde(default)]
    estado: String,
    #[serde(default)]
    manifestacion: Vec<i64>,
}

pub async fn search_for_results(
    backend: &SearchBackend,
    form: SearchForm,
    raw: &[(String, String)],
) -> anyhow::Result<SearchResultYacimientos> {
    let (query, filters) = match prepare_search(form, raw) {
        PreparedSearch::NoQuery(errors) => return Ok(SearchResultYacimientos::no_query_found(errors)),
        PreparedSearch::Ready { query, filters } => (query, filters),
    };

    let sql_where_clause = build_sql_where_clause(&query.query_string, &filters)?;
    let Some(offset) = query.page.checked_mul(PAGE_SIZE) else {
        anyhow::bail!("Page number out of range: {}", query.page);
    };
    // one extra row tells whether a next page exists
    let limit = PAGE_SIZE + 1;
    let index = &backend.index_name;

    let sql = format!(
        "
    SELECT {RESULT_COLUMNS}
    FROM {index}
    {sql_where_clause}
    ORDER BY codigo ASC
    LIMIT {limit} OFFSET {offset}
    {SQL_OPTIONS_CLAUSE}
    ;",
    );
    tracing::debug!(%sql, "search for results");
    let response = backend.manticore_search_sql::<SearchForResultsResponse>(sql).await?;

    let mut results = response
        .hits
        .hits
        .into_iter()
        .map(|hit| {
            let hit = hit._source;
            SearchResultYacimientoItem::new(hit.codigo, hit.nombre, hit.municipio, hit.estado, &hit.manifestacion)
        })
        .collect::<Vec<_>>();

    let has_next_page = results.len() > PAGE_SIZE as usize;
    results.truncate(PAGE_SIZE as usize);
    for (i, result) in results.iter_mut().enumerate() {
        result.result_index_in_page = i as u64;
    }

    Ok(SearchResultYacimientos {
        query_string: query.query_string,
        filters,
        results,
        page_number: query.page,
        has_next_page,
        errors: Default::default(),
    })
}
