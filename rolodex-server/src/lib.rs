//! rolodex-server: HTTP service for person records
//!
//! Stores people with their education and skill entries in SQLite and
//! exposes create/read endpoints over HTTP.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DbError, Person, PersonRepo};
pub use http::{build_router, run_server, ServerConfig};
