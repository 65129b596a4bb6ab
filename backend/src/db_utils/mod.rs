//! Clients for the search index and its response cache.

pub mod clickhouse_utils;
pub mod manticore_utils;
