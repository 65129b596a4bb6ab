//! Search API operations.

pub mod search;
