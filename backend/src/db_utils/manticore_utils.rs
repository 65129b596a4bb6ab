use anyhow::Context;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use crate::config::Config;
use crate::db_utils::clickhouse_utils::get_clickhouse_client;

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResult<T> {
    pub hits: RawSearchResultHits<T>,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub took: u64,
    pub aggregations: Option<BTreeMap<String, RawSearchResultAggregation>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHits<T> {
    pub hits: Vec<RawSearchResultHit<T>>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_relation: String,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawSearchResultAggregation {
    pub buckets: Vec<RawSearchResultAggregationBucket>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawSearchResultAggregationBucket {
    pub key: serde_json::Value,
    pub doc_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHit<T> {
    pub _source: T,
    #[serde(default)]
    pub _score: u64,
}

/// Handle on the search index and the optional response cache in front of it.
pub struct SearchBackend {
    http: reqwest::Client,
    manticore_url: String,
    pub index_name: String,
    cache: Option<clickhouse::Client>,
}

impl SearchBackend {
    pub fn new(manticore_url: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            manticore_url: manticore_url.into().trim_end_matches('/').to_string(),
            index_name: index_name.into(),
            cache: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut backend = Self::new(&config.manticore_url, &config.index_name);
        backend.cache = config.clickhouse().map(|c| get_clickhouse_client(&c));
        backend
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub async fn manticore_search_sql<T: DeserializeOwned + std::fmt::Debug>(
        &self,
        sql: String,
    ) -> anyhow::Result<RawSearchResult<T>> {
        let query_hash = sha256::digest(sql.clone());
        if let Some(cache) = &self.cache {
            if let Ok(cached_response) = get_cached_response(cache, &query_hash, &sql).await {
                if let Ok(response) = serde_json::from_str::<RawSearchResult<T>>(&cached_response) {
                    tracing::debug!(%query_hash, "search cache hit");
                    return Ok(response);
                }
            }
            tracing::debug!(%query_hash, "search cache miss");
        }

        let t0 = std::time::Instant::now();
        let url = format!("{}/sql", self.manticore_url);
        let response = self
            .http
            .post(url)
            .body(sql.clone())
            .send()
            .await
            .context("Failed to reach search index")?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Search index error: {}: {}", status, response_txt);
        }
        let dt_ms = t0.elapsed().as_millis() as u32;
        tracing::info!(len = response_txt.len(), dt_ms, "search response");

        if let Some(cache) = &self.cache {
            match insert_cache(cache, &query_hash, &sql, &response_txt, dt_ms).await {
                Ok(()) => tracing::debug!(%query_hash, "search cache inserted"),
                Err(e) => tracing::warn!(%query_hash, error = %e, "search cache insert failed"),
            }
        }

        let response: RawSearchResult<T> =
            serde_json::from_str(&response_txt).context("Invalid response from search index")?;
        Ok(response)
    }
}


async fn get_cached_response(client: &clickhouse::Client, query_hash: &str, query_string: &str) -> anyhow::Result<String> {
    let sql = "
    SELECT result_json
    FROM search_manticore_cache
    WHERE query_hash = ?
      AND query_string = ?
    ORDER BY date_created DESC
    LIMIT 1
    ";
    let rows = client
        .query(sql)
        .bind(query_hash)
        .bind(query_string)
        .fetch_all::<String>()
        .await?;
    if let Some(result_json) = rows.into_iter().next() {
        Ok(result_json)
    } else {
        anyhow::bail!("Cache miss")
    }
}


async fn insert_cache(client: &clickhouse::Client, query_hash: &str, query_string: &str, response_txt: &str, dt_ms: u32) -> anyhow::Result<()> {
    let sql = "
    INSERT INTO search_manticore_cache (query_hash, query_string, result_json, duration_ms)
    VALUES (?, ?, ?, ?)
    ";
    client
        .query(sql)
        .bind(query_hash)
        .bind(query_string)
        .bind(response_txt)
        .bind(dt_ms)
        .execute()
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        codigo: String,
    }

    #[test]
    fn test_decode_hits_envelope() {
        let body = r#"{"took":1,"timed_out":false,"hits":{"total":1,"total_relation":"eq",
            "hits":[{"_id":1,"_score":1,"_source":{"codigo":"ZU-7"}}]}}"#;
        let response: RawSearchResult<Row> = serde_json::from_str(body).unwrap();
        assert_eq!(response.hits.hits[0]._source.codigo, "ZU-7");
        assert!(response.aggregations.is_none());
    }

    #[test]
    fn test_decode_aggregations() {
        let body = r#"{"hits":{"hits":[]},"aggregations":{"estado":{"buckets":[
            {"key":"Zulia","doc_count":4},{"key":"Lara","doc_count":2}]}}}"#;
        let response: RawSearchResult<serde_json::Value> = serde_json::from_str(body).unwrap();
        let buckets = &response.aggregations.unwrap()["estado"].buckets;
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].doc_count, 4);
    }

    #[test]
    fn test_backend_without_cache() {
        let backend = SearchBackend::new("http://127.0.0.1:9308/", "anar_yacimientos");
        assert!(!backend.cache_enabled());
        assert_eq!(backend.manticore_url, "http://127.0.0.1:9308");
    }
}
