//! Search service for the ANAR site registry.

pub mod api;
pub mod app;
pub mod config;
pub mod db_utils;
pub mod server;
