//! Common library exports shared by the search backend and its clients.

extern crate serde;


pub mod catalogs;
pub mod field_spec;
pub mod field_value;
pub mod search_form;
pub mod search_query;
pub mod search_result;
pub mod search_const;
