//! HTTP surface of the search service.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::db_utils::manticore_utils::SearchBackend;

pub fn router(backend: SearchBackend) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/forms/{form}", get(routes::form_fields))
        .route("/api/search/{form}", get(routes::search_results))
        .route("/api/search/{form}/count", get(routes::search_hit_count))
        .route("/api/search/{form}/facets/{field}", get(routes::search_facets))
        .with_state(Arc::new(backend))
}
