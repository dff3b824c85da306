//! EPC Lookup API Library
//!
//! Read-only HTTP lookups over a database of building energy performance
//! certificates: address search by postcode, rating and recommendations by
//! address, and a database health check.
//!
//! # Modules
//!
//! - `api`: Router assembly and OpenAPI document.
//! - `config`: Configuration management.
//! - `db`: Read-only SQLite pool construction.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Row types and response records.
//! - `normalize`: Postcode/address normalization and address ordering.
//! - `services`: Certificate lookups.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod services;
