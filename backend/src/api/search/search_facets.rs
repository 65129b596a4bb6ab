//! Facet counts for one choice field, shaped for display.

use std::collections::HashSet;

use common::{
    catalogs::Catalog,
    field_spec::FieldSpec,
    search_const::FACET_LIMIT,
    search_form::SearchForm,
    search_result::{FacetOriginalValue, SearchResultFacetItem, SearchResultFacets},
};
use crate::api::search::search_sql::{SQL_OPTIONS_CLAUSE, build_sql_where_clause};
use crate::api::search::{PreparedSearch, prepare_search};
use crate::db_utils::manticore_utils::{RawSearchResultAggregation, RawSearchResultAggregationBucket, SearchBackend};

pub async fn search_facet(
    backend: &SearchBackend,
    form: SearchForm,
    raw: &[(String, String)],
    field: &FieldSpec,
) -> anyhow::Result<SearchResultFacets> {
    let Some(catalog) = field.catalog() else {
        anyhow::bail!("Field {} has no facet", field.name);
    };
    let column = field.name;

    let (query, mut filters) = match prepare_search(form, raw) {
        PreparedSearch::NoQuery(errors) => {
            return Ok(SearchResultFacets {
                query_string: String::new(),
                filters: Default::default(),
                facet_field: column.to_string(),
                facet_values: vec![],
                errors,
            });
        }
        PreparedSearch::Ready { query, filters } => (query, filters),
    };
    // remove the filter on the faceted column, the facet lists every value the rest of the query allows
    filters.remove_field(column);

    let sql_where_clause = build_sql_where_clause(&query.query_string, &filters)?;
    let index = &backend.index_name;
    let sql = format!(
        "
        SELECT id
        FROM {index}
        {sql_where_clause}
        LIMIT 0
        {SQL_OPTIONS_CLAUSE}
        FACET {column} ORDER BY COUNT(*) DESC LIMIT {FACET_LIMIT}
        ;",
    );
    let facets = backend.manticore_search_sql::<serde_json::Value>(sql).await?;
    let buckets = facets
        .aggregations
        .unwrap_or_default()
        .remove(column)
        .unwrap_or(RawSearchResultAggregation::default())
        .buckets;

    Ok(SearchResultFacets {
        query_string: query.query_string,
        filters,
        facet_field: column.to_string(),
        facet_values: facet_items(buckets, catalog)?,
        errors: Default::default(),
    })
}

fn facet_items(buckets: Vec<RawSearchResultAggregationBucket>, catalog: &Catalog) -> anyhow::Result<Vec<SearchResultFacetItem>> {
    let mut present_values = HashSet::new();
    let mut items = Vec::new();
    for bucket in buckets {
        let original_value = match &bucket.key {
            serde_json::Value::String(s) => FacetOriginalValue::String(s.clone()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FacetOriginalValue::Int(i),
                None => anyhow::bail!("Invalid facet value from search index: {:#?}", bucket.key),
            },
            _ => anyhow::bail!("Invalid facet value from search index: {:#?}", bucket.key),
        };
        if !present_values.insert(original_value.clone()) {
            continue;
        }
        let display_string = match &original_value {
            FacetOriginalValue::Int(i) => catalog.label_for_int(*i).map(str::to_string).unwrap_or_else(|| i.to_string()),
            FacetOriginalValue::String(s) => s.clone(),
        };
        items.push(SearchResultFacetItem { display_string, original_value, count: bucket.doc_count });
    }
    items.sort_by_key(|item| (u64::MAX - item.count, item.display_string.clone()));
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::catalogs::{ESTADO, TIPO_MANIFESTACION};

    fn bucket(key: serde_json::Value, doc_count: u64) -> RawSearchResultAggregationBucket {
        RawSearchResultAggregationBucket { key, doc_count }
    }

    #[test]
    fn test_int_facets_use_catalog_labels() {
        let items = facet_items(
            vec![bucket(3.into(), 2), bucket(1.into(), 5), bucket(99.into(), 1)],
            &TIPO_MANIFESTACION,
        )
        .unwrap();
        let labels = items.iter().map(|i| i.display_string.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Geoglifo", "Petroglifo", "99"]);
        assert_eq!(items[0].original_value, FacetOriginalValue::Int(1));
        assert_eq!(items[0].count, 5);
    }

    #[test]
    fn test_duplicate_buckets_dropped_and_ties_sorted_by_label() {
        let items = facet_items(
            vec![bucket("Zulia".into(), 2), bucket("Lara".into(), 2), bucket("Zulia".into(), 1)],
            &ESTADO,
        )
        .unwrap();
        let labels = items.iter().map(|i| i.display_string.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Lara", "Zulia"]);
    }

    #[test]
    fn test_rejects_non_scalar_keys() {
        assert!(facet_items(vec![bucket(serde_json::json!([1]), 1)], &ESTADO).is_err());
    }

    #[tokio::test]
    async fn test_facet_on_empty_request_is_empty() {
        let backend = SearchBackend::new("http://127.0.0.1:9", "anar_yacimientos");
        let field = SearchForm::Basic.field("estado").unwrap();
        let result = search_facet(&backend, SearchForm::Basic, &[], field).await.unwrap();
        assert_eq!(result.facet_field, "estado");
        assert!(result.facet_values.is_empty());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_facet_on_invalid_request_reports_errors() {
        let backend = SearchBackend::new("http://127.0.0.1:9", "anar_yacimientos");
        let field = SearchForm::Advanced.field("estado").unwrap();
        let raw = vec![("suelo".to_string(), "99".to_string())];
        let result = search_facet(&backend, SearchForm::Advanced, &raw, field).await.unwrap();
        assert!(result.facet_values.is_empty());
        assert!(result.errors.get("suelo").is_some());
    }

    #[tokio::test]
    async fn test_facet_needs_choice_field() {
        let backend = SearchBackend::new("http://127.0.0.1:9", "anar_yacimientos");
        let field = SearchForm::Basic.field("nombre").unwrap();
        assert!(search_facet(&backend, SearchForm::Basic, &[], field).await.is_err());
    }
}
