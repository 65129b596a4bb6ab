//! Route handlers for the search API.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use common::field_spec::{FieldDescription, FieldSpec};
use common::search_form::SearchForm;
use common::search_result::{SearchResultFacets, SearchResultYacimientos};

use crate::api::search;
use crate::db_utils::manticore_utils::SearchBackend;
use crate::server::error::ApiError;

pub type AppState = Arc<SearchBackend>;

/// Raw query-string pairs in submission order; repeated names are kept.
type RawParams = Query<Vec<(String, String)>>;

fn parse_form(form: &str) -> Result<SearchForm, ApiError> {
    form.parse::<SearchForm>().map_err(|e| ApiError::NotFound(e.to_string()))
}

fn facet_field(form: SearchForm, field: &str) -> Result<&'static FieldSpec, ApiError> {
    match form.field(field) {
        Some(spec) if spec.catalog().is_some() => Ok(spec),
        Some(_) => Err(ApiError::BadRequest(format!("Field {field} cannot be faceted"))),
        None => Err(ApiError::BadRequest(format!("Unknown field: {field}"))),
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn form_fields(Path(form): Path<String>) -> Result<Json<Vec<FieldDescription>>, ApiError> {
    Ok(Json(parse_form(&form)?.describe()))
}

pub async fn search_results(
    State(backend): State<AppState>,
    Path(form): Path<String>,
    Query(raw): RawParams,
) -> Result<Json<SearchResultYacimientos>, ApiError> {
    let form = parse_form(&form)?;
    let result = search::search_for_results(&backend, form, &raw).await?;
    tracing::info!(?form, results = result.results.len(), page = result.page_number, "search");
    Ok(Json(result))
}

pub async fn search_hit_count(
    State(backend): State<AppState>,
    Path(form): Path<String>,
    Query(raw): RawParams,
) -> Result<Json<search::SearchForResultsHitCountResponse>, ApiError> {
    let form = parse_form(&form)?;
    let total_count = search::search_for_results_hit_count(&backend, form, &raw).await?;
    Ok(Json(search::SearchForResultsHitCountResponse { total_count }))
}

pub async fn search_facets(
    State(backend): State<AppState>,
    Path((form, field)): Path<(String, String)>,
    Query(raw): RawParams,
) -> Result<Json<SearchResultFacets>, ApiError> {
    let form = parse_form(&form)?;
    let spec = facet_field(form, &field)?;
    Ok(Json(search::search_facet(&backend, form, &raw, spec).await?))
}
